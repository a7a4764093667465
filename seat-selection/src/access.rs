//! Session guard for the seat-selection view.
//!
//! Routing asks a [`GuardPolicy`] to authorize the signed-in session before
//! any seat-selection state exists. A successful check mints a
//! [`SeatSelectionAccess`] token, which is the only way to build that state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role tag carried by a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Traveller booking seats
    Customer,
    /// Travel agency staff
    Agent,
    /// Administrator
    Admin,
}

impl Role {
    /// Uppercase tag as stored in the session
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Agent => "AGENT",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role tag is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CUSTOMER" => Ok(Self::Customer),
            "AGENT" => Ok(Self::Agent),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Signed-in user as seen by the router
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Display name; `None` when nobody is signed in
    pub user_name: Option<String>,
    /// Role tag; may be unset even for a signed-in user
    pub role: Option<Role>,
}

impl Session {
    /// Session of a signed-in user
    #[must_use]
    pub fn signed_in(user_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_name: Some(user_name.into()),
            role: Some(role),
        }
    }

    /// Nobody signed in
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Where a refused session is sent instead
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Entry (sign-in) page
    Entry,
    /// Agency dashboard
    Agency,
    /// Admin dashboard
    Admin,
}

impl Redirect {
    /// Route path
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Entry => "/",
            Self::Agency => "/agency",
            Self::Admin => "/admin",
        }
    }
}

/// Capability proving a session was allowed onto the seat-selection view
///
/// Minted only by [`GuardPolicy::authorize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatSelectionAccess {
    user_name: String,
    role: Role,
}

impl SeatSelectionAccess {
    /// Signed-in user
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Role the session was admitted under
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Which roles may open the seat-selection view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardPolicy {
    permitted: Vec<Role>,
}

impl Default for GuardPolicy {
    /// Customers only
    fn default() -> Self {
        Self::permitting([Role::Customer])
    }
}

impl GuardPolicy {
    /// Policy admitting exactly the given roles
    #[must_use]
    pub fn permitting(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut permitted: Vec<Role> = Vec::new();
        for role in roles {
            if !permitted.contains(&role) {
                permitted.push(role);
            }
        }
        Self { permitted }
    }

    /// Policy admitting no role at all
    ///
    /// Every session is redirected, leaving the view unreachable.
    #[must_use]
    pub fn observed() -> Self {
        Self::permitting([])
    }

    /// Roles admitted
    #[must_use]
    pub fn permitted(&self) -> &[Role] {
        &self.permitted
    }

    /// Admit the session or say where to send it
    ///
    /// # Errors
    ///
    /// Returns the [`Redirect`] for a session without a user name or with a
    /// role the policy does not admit.
    pub fn authorize(&self, session: &Session) -> Result<SeatSelectionAccess, Redirect> {
        if self.permitted.is_empty() {
            tracing::warn!("Seat selection guard admits no role; the view is unreachable");
        }

        let Some(user_name) = session.user_name.as_deref().filter(|name| !name.is_empty()) else {
            tracing::debug!("No signed-in user, redirecting to entry");
            return Err(Redirect::Entry);
        };

        match session.role {
            Some(role) if self.permitted.contains(&role) => {
                tracing::debug!(user = user_name, %role, "Session admitted to seat selection");
                Ok(SeatSelectionAccess {
                    user_name: user_name.to_string(),
                    role,
                })
            },
            Some(Role::Agent) => Err(Redirect::Agency),
            Some(Role::Admin) => Err(Redirect::Admin),
            Some(Role::Customer) | None => Err(Redirect::Entry),
        }
    }
}
