//! Configuration management for the seat-selection flow.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::access::{GuardPolicy, Role, Session};
use std::env;
use thiserror::Error;

/// Errors from reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bus service API configuration
    pub api: ApiConfig,
    /// Session standing in for the signed-in user
    pub session: SessionConfig,
    /// Roles admitted to the seat-selection view; empty admits none
    pub permitted_roles: Vec<Role>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

/// Bus service API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the bus service
    pub base_url: String,
    /// Bearer credential for the customer API
    pub bearer_token: Option<String>,
    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u64,
}

/// Session configuration
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Signed-in user name
    pub user_name: Option<String>,
    /// Role of the signed-in user
    pub role: Option<Role>,
}

impl SessionConfig {
    /// Session as seen by the guard
    #[must_use]
    pub fn session(&self) -> Session {
        Session {
            user_name: self.user_name.clone(),
            role: self.role,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup
    ///
    /// Unset and empty variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let request_timeout_secs = match var("SEATFLOW_REQUEST_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|e| {
                ConfigError::Invalid {
                    var: "SEATFLOW_REQUEST_TIMEOUT_SECS",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => 30,
        };

        let role = var("SEATFLOW_USER_ROLE")
            .map(|value| parse_role("SEATFLOW_USER_ROLE", &value))
            .transpose()?;

        // Set-but-empty means "admit nobody", unlike unset
        let permitted_roles = match lookup("SEATFLOW_PERMITTED_ROLES") {
            Some(value) => value
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| parse_role("SEATFLOW_PERMITTED_ROLES", part))
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![Role::Customer],
        };

        Ok(Self {
            api: ApiConfig {
                base_url: var("BUS_SERVICE_API_BASE_URL")
                    .unwrap_or_else(|| "http://localhost:8080".to_string()),
                bearer_token: var("SEATFLOW_JWT_TOKEN"),
                request_timeout_secs,
            },
            session: SessionConfig {
                user_name: var("SEATFLOW_USER_NAME"),
                role,
            },
            permitted_roles,
            log_level: var("SEATFLOW_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Guard policy for the configured roles
    #[must_use]
    pub fn guard_policy(&self) -> GuardPolicy {
        if self.permitted_roles.is_empty() {
            GuardPolicy::observed()
        } else {
            GuardPolicy::permitting(self.permitted_roles.iter().copied())
        }
    }
}

fn parse_role(var: &'static str, value: &str) -> Result<Role, ConfigError> {
    value.parse::<Role>().map_err(|e| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.bearer_token, None);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.session.session(), Session::anonymous());
        assert_eq!(config.permitted_roles, vec![Role::Customer]);
        assert_eq!(config.guard_policy(), GuardPolicy::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("BUS_SERVICE_API_BASE_URL", "https://bus.example"),
            ("SEATFLOW_JWT_TOKEN", "abc"),
            ("SEATFLOW_REQUEST_TIMEOUT_SECS", "0"),
            ("SEATFLOW_USER_NAME", "jane"),
            ("SEATFLOW_USER_ROLE", "agent"),
            ("SEATFLOW_PERMITTED_ROLES", "CUSTOMER, AGENT"),
            ("SEATFLOW_LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.api.base_url, "https://bus.example");
        assert_eq!(config.api.bearer_token.as_deref(), Some("abc"));
        assert_eq!(config.api.request_timeout_secs, 0);
        assert_eq!(config.session.session(), Session::signed_in("jane", Role::Agent));
        assert_eq!(config.permitted_roles, vec![Role::Customer, Role::Agent]);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn empty_permitted_roles_means_observed_policy() {
        let config = load(&[("SEATFLOW_PERMITTED_ROLES", "")]).unwrap();
        assert!(config.permitted_roles.is_empty());
        assert_eq!(config.guard_policy(), GuardPolicy::observed());
    }

    #[test]
    fn rejects_bad_values() {
        let err = load(&[("SEATFLOW_REQUEST_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: "SEATFLOW_REQUEST_TIMEOUT_SECS", .. }
        ));

        assert!(load(&[("SEATFLOW_USER_ROLE", "guest")]).is_err());
        assert!(load(&[("SEATFLOW_PERMITTED_ROLES", "CUSTOMER,guest")]).is_err());
    }
}
