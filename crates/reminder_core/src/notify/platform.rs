//! Platform contract for locally-timed alerts.

use super::id::NotificationId;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Alert permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Failure raised by the platform notification API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    pub message: String,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification platform error: {}", self.message)
    }
}

impl Error for PlatformError {}

/// Presentation hints attached to every alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationStyle {
    pub sound: String,
    pub small_icon: String,
    /// `#RRGGBB`.
    pub icon_color: String,
}

impl Default for NotificationStyle {
    fn default() -> Self {
        Self {
            sound: "default".to_string(),
            small_icon: "ic_stat_icon_config_sample".to_string(),
            icon_color: "#A855F7".to_string(),
        }
    }
}

/// One-shot alert registered with the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledAlert {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
    pub style: NotificationStyle,
}

/// Local notification capability provided by the host platform.
pub trait NotificationPlatform {
    /// Prompts the user when needed and returns the resulting state.
    fn request_permission(&self) -> PlatformResult<PermissionState>;
    /// Returns the current state without prompting.
    fn check_permission(&self) -> PlatformResult<PermissionState>;
    /// Registers an alert, replacing any pending alert with the same id.
    fn schedule(&self, alert: &ScheduledAlert) -> PlatformResult<()>;
    /// Cancels pending alerts; unknown ids are ignored.
    fn cancel(&self, ids: &[NotificationId]) -> PlatformResult<()>;
    /// Lists pending alerts.
    fn pending(&self) -> PlatformResult<Vec<ScheduledAlert>>;
}

impl<T: NotificationPlatform + ?Sized> NotificationPlatform for &T {
    fn request_permission(&self) -> PlatformResult<PermissionState> {
        (**self).request_permission()
    }

    fn check_permission(&self) -> PlatformResult<PermissionState> {
        (**self).check_permission()
    }

    fn schedule(&self, alert: &ScheduledAlert) -> PlatformResult<()> {
        (**self).schedule(alert)
    }

    fn cancel(&self, ids: &[NotificationId]) -> PlatformResult<()> {
        (**self).cancel(ids)
    }

    fn pending(&self) -> PlatformResult<Vec<ScheduledAlert>> {
        (**self).pending()
    }
}
