//! In-process notification platform.
//!
//! Holds pending alerts in a table keyed by notification id. Hosts that own
//! the real OS notification API mirror this table; tests inspect it directly.

use super::id::NotificationId;
use super::platform::{
    NotificationPlatform, PermissionState, PlatformError, PlatformResult, ScheduledAlert,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct PlatformState {
    permission: PermissionState,
    grant_on_request: bool,
    pending: BTreeMap<NotificationId, ScheduledAlert>,
    failure: Option<String>,
}

/// Thread-safe pending-alert table implementing `NotificationPlatform`.
#[derive(Debug)]
pub struct InMemoryNotificationPlatform {
    state: Mutex<PlatformState>,
}

impl Default for InMemoryNotificationPlatform {
    fn default() -> Self {
        Self::new(PermissionState::Denied, true)
    }
}

impl InMemoryNotificationPlatform {
    /// `grant_on_request` is the answer a permission prompt will produce.
    pub fn new(permission: PermissionState, grant_on_request: bool) -> Self {
        Self {
            state: Mutex::new(PlatformState {
                permission,
                grant_on_request,
                pending: BTreeMap::new(),
                failure: None,
            }),
        }
    }

    /// Permission already granted.
    pub fn granted() -> Self {
        Self::new(PermissionState::Granted, true)
    }

    /// Permission denied and every prompt refused.
    pub fn denied() -> Self {
        Self::new(PermissionState::Denied, false)
    }

    /// Overrides the current permission state, as a host does after an OS prompt.
    pub fn set_permission(&self, permission: PermissionState) {
        let mut state = self.lock();
        state.permission = permission;
        state.grant_on_request = permission.is_granted();
    }

    /// Makes every subsequent call fail with `message`; `None` restores service.
    pub fn set_failure(&self, message: Option<&str>) {
        self.lock().failure = message.map(str::to_string);
    }

    /// Returns the pending alert registered under `id`.
    pub fn pending_alert(&self, id: NotificationId) -> Option<ScheduledAlert> {
        self.lock().pending.get(&id).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> MutexGuard<'_, PlatformState> {
        // A poisoned table is still structurally valid.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn checked(&self) -> PlatformResult<MutexGuard<'_, PlatformState>> {
        let state = self.lock();
        match state.failure.as_deref() {
            Some(message) => Err(PlatformError::new(message)),
            None => Ok(state),
        }
    }
}

impl NotificationPlatform for InMemoryNotificationPlatform {
    fn request_permission(&self) -> PlatformResult<PermissionState> {
        let mut state = self.checked()?;
        if !state.permission.is_granted() && state.grant_on_request {
            state.permission = PermissionState::Granted;
        }
        Ok(state.permission)
    }

    fn check_permission(&self) -> PlatformResult<PermissionState> {
        Ok(self.checked()?.permission)
    }

    fn schedule(&self, alert: &ScheduledAlert) -> PlatformResult<()> {
        let mut state = self.checked()?;
        if !state.permission.is_granted() {
            return Err(PlatformError::new("permission not granted"));
        }
        state.pending.insert(alert.id, alert.clone());
        Ok(())
    }

    fn cancel(&self, ids: &[NotificationId]) -> PlatformResult<()> {
        let mut state = self.checked()?;
        for id in ids {
            state.pending.remove(id);
        }
        Ok(())
    }

    fn pending(&self) -> PlatformResult<Vec<ScheduledAlert>> {
        Ok(self.checked()?.pending.values().cloned().collect())
    }
}
