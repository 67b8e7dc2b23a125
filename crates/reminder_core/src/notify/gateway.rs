//! Best-effort wrapper over a `NotificationPlatform`.
//!
//! # Invariants
//! - Platform errors are logged and mapped to `AlertOutcome::Failed`.
//! - Permission failures read as "not granted".
//! - Alert titles and bodies are never logged.

use super::id::NotificationId;
use super::platform::{NotificationPlatform, NotificationStyle, ScheduledAlert};
use chrono::{DateTime, Utc};
use log::{error, info, warn};

/// Result of one gateway call. Callers may ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    Scheduled(NotificationId),
    /// Number of alerts the cancel call targeted.
    Cancelled(usize),
    /// Permission was not granted even after asking.
    PermissionDenied,
    /// Nothing to do for this reminder state.
    NotNeeded,
    Failed(String),
}

impl AlertOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Permission-aware scheduling front for the platform.
pub struct NotificationGateway<P: NotificationPlatform> {
    platform: P,
    style: NotificationStyle,
}

impl<P: NotificationPlatform> NotificationGateway<P> {
    pub fn new(platform: P) -> Self {
        Self::with_style(platform, NotificationStyle::default())
    }

    pub fn with_style(platform: P, style: NotificationStyle) -> Self {
        Self { platform, style }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Asks for alert permission; errors count as denied.
    pub fn request_permission(&self) -> bool {
        match self.platform.request_permission() {
            Ok(state) => {
                info!(
                    "event=notify_permission module=notify status=ok action=request granted={}",
                    state.is_granted()
                );
                state.is_granted()
            }
            Err(err) => {
                error!(
                    "event=notify_permission module=notify status=error action=request error={err}"
                );
                false
            }
        }
    }

    /// Reads alert permission without prompting; errors count as denied.
    pub fn check_permission(&self) -> bool {
        match self.platform.check_permission() {
            Ok(state) => state.is_granted(),
            Err(err) => {
                error!(
                    "event=notify_permission module=notify status=error action=check error={err}"
                );
                false
            }
        }
    }

    /// Registers a one-shot alert, asking for permission first when needed.
    pub fn schedule(
        &self,
        id: NotificationId,
        title: &str,
        body: &str,
        at: DateTime<Utc>,
    ) -> AlertOutcome {
        if !self.check_permission() && !self.request_permission() {
            warn!("event=notify_schedule module=notify status=skipped reason=permission_denied id={id}");
            return AlertOutcome::PermissionDenied;
        }

        let alert = ScheduledAlert {
            id,
            title: title.to_string(),
            body: body.to_string(),
            fire_at: at,
            style: self.style.clone(),
        };
        match self.platform.schedule(&alert) {
            Ok(()) => {
                info!(
                    "event=notify_schedule module=notify status=ok id={id} fire_at={}",
                    at.to_rfc3339()
                );
                AlertOutcome::Scheduled(id)
            }
            Err(err) => {
                error!("event=notify_schedule module=notify status=error id={id} error={err}");
                AlertOutcome::Failed(err.to_string())
            }
        }
    }

    /// Cancels one alert; unknown ids are a no-op on the platform side.
    pub fn cancel(&self, id: NotificationId) -> AlertOutcome {
        match self.platform.cancel(&[id]) {
            Ok(()) => {
                info!("event=notify_cancel module=notify status=ok id={id}");
                AlertOutcome::Cancelled(1)
            }
            Err(err) => {
                error!("event=notify_cancel module=notify status=error id={id} error={err}");
                AlertOutcome::Failed(err.to_string())
            }
        }
    }

    /// Cancels every pending alert.
    pub fn cancel_all(&self) -> AlertOutcome {
        let ids = match self.platform.pending() {
            Ok(pending) => pending.into_iter().map(|alert| alert.id).collect::<Vec<_>>(),
            Err(err) => {
                error!("event=notify_cancel_all module=notify status=error stage=pending error={err}");
                return AlertOutcome::Failed(err.to_string());
            }
        };

        if !ids.is_empty() {
            if let Err(err) = self.platform.cancel(&ids) {
                error!("event=notify_cancel_all module=notify status=error stage=cancel error={err}");
                return AlertOutcome::Failed(err.to_string());
            }
        }

        info!(
            "event=notify_cancel_all module=notify status=ok count={}",
            ids.len()
        );
        AlertOutcome::Cancelled(ids.len())
    }
}
