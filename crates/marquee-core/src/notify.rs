// ── Notifications ──
//
// One transient message per write: the status line on success, the status
// line or the retry message on failure. Expires on its own after a few
// seconds unless dismissed first.

use std::time::Duration;

use marquee_api::Status;
use strum::Display;
use tokio::time::Instant;

use crate::error::CoreError;

/// How long a notification stays visible.
pub const AUTO_HIDE: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
            raised_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            raised_at: Instant::now(),
        }
    }

    /// `"{code}: {reason}"`, severity picked by the status class.
    pub fn from_status(status: &Status) -> Self {
        if status.is_success() {
            Self::success(status.to_string())
        } else {
            Self::error(status.to_string())
        }
    }

    pub fn from_error(err: &CoreError) -> Self {
        Self::error(err.notification_message())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn expires_at(&self) -> Instant {
        self.raised_at + AUTO_HIDE
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at()
    }
}

/// Holds at most one visible notification.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `notification`, replacing whatever was visible.
    pub fn raise(&mut self, notification: Notification) {
        self.current = Some(notification);
    }

    /// The visible notification, dropping it first if it has expired.
    pub fn current(&mut self) -> Option<&Notification> {
        if self.current.as_ref().is_some_and(Notification::is_expired) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.current.take()
    }
}
