//! Outbound collaborators: user notifications and the payment handoff.

use crate::booking::BookingPayload;

/// Severity of a user-visible notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Something the user should fix
    Warning,
    /// Something went wrong
    Error,
}

/// Fire-and-forget message for the user (a toast)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Text shown to the user
    pub message: String,
}

impl Notification {
    /// Error-level notification
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Warning-level notification
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }
}

/// Notification channel
pub trait Notifier: Send + Sync {
    /// Show a notification; never blocks, never fails
    fn notify(&self, notification: Notification);
}

/// Transfer to the payment step
pub trait PaymentHandoff: Send + Sync {
    /// Pass a completed booking on
    fn hand_off(&self, payload: BookingPayload);
}

/// [`Notifier`] that writes notifications to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let message = notification.message;
        match notification.level {
            NotificationLevel::Warning => tracing::warn!(target: "notification", "{message}"),
            NotificationLevel::Error => tracing::error!(target: "notification", "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_level() {
        assert_eq!(Notification::error("x").level, NotificationLevel::Error);
        assert_eq!(Notification::warning("x").level, NotificationLevel::Warning);
        assert_eq!(Notification::warning("x").message, "x");
    }

    #[test]
    fn tracing_notifier_accepts_every_level() {
        TracingNotifier.notify(Notification::warning("check fields"));
        TracingNotifier.notify(Notification::error("failed"));
    }
}
