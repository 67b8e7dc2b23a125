//! Reminder use-cases with alert synchronization.
//!
//! # Responsibility
//! - Route user actions to `ReminderStore` mutators.
//! - Schedule or cancel the matching local alert after each mutation.
//!
//! # Invariants
//! - Alert calls happen only after the store mutation committed.
//! - Alert failures never fail the use-case; they come back as outcomes.
//! - Completed or past-due reminders have no scheduled alert.

use crate::model::reminder::{Reminder, ReminderDraft, ReminderId};
use crate::notify::gateway::{AlertOutcome, NotificationGateway};
use crate::notify::id::{derive_notification_id, NotificationId};
use crate::notify::platform::NotificationPlatform;
use crate::repo::slot_storage::ReminderStorage;
use crate::service::reminder_store::{ReminderStore, StoreResult};
use chrono::{DateTime, Utc};
use log::info;

/// Body used when a reminder has no description.
pub const DEFAULT_ALERT_BODY: &str = "Reminder due";

/// Store result paired with the alert sync outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSynced<T> {
    pub value: T,
    pub alert: AlertOutcome,
}

/// Store + gateway facade used by host integrations.
pub struct ReminderService<S: ReminderStorage, P: NotificationPlatform> {
    store: ReminderStore<S>,
    gateway: NotificationGateway<P>,
}

impl<S: ReminderStorage, P: NotificationPlatform> ReminderService<S, P> {
    pub fn new(store: ReminderStore<S>, gateway: NotificationGateway<P>) -> Self {
        Self { store, gateway }
    }

    pub fn store(&self) -> &ReminderStore<S> {
        &self.store
    }

    pub fn gateway(&self) -> &NotificationGateway<P> {
        &self.gateway
    }

    /// Creates a reminder and schedules its alert when due in the future.
    pub fn create(
        &mut self,
        draft: ReminderDraft,
        now: DateTime<Utc>,
    ) -> StoreResult<AlertSynced<Reminder>> {
        let reminder = self.store.add(draft)?;
        let alert = self.sync_alert(&reminder, now);
        Ok(AlertSynced {
            value: reminder,
            alert,
        })
    }

    /// Toggles completion; completing cancels the alert, reopening reschedules it.
    pub fn toggle(
        &mut self,
        id: ReminderId,
        now: DateTime<Utc>,
    ) -> StoreResult<AlertSynced<Option<bool>>> {
        let completed = self.store.toggle_completion(id)?;
        let alert = match self.store.get(id) {
            Some(reminder) if completed.is_some() => self.sync_alert(reminder, now),
            _ => AlertOutcome::NotNeeded,
        };
        Ok(AlertSynced {
            value: completed,
            alert,
        })
    }

    /// Deletes a reminder and cancels its alert.
    pub fn delete(&mut self, id: ReminderId) -> StoreResult<AlertSynced<Option<Reminder>>> {
        let removed = self.store.remove(id)?;
        let alert = match removed.as_ref() {
            Some(reminder) => self.gateway.cancel(notification_id(reminder)),
            None => AlertOutcome::NotNeeded,
        };
        Ok(AlertSynced {
            value: removed,
            alert,
        })
    }

    /// Rebuilds the pending alert set from the collection.
    ///
    /// Cancels every pending alert, then schedules one per active reminder
    /// due after `now`. Returns the number of alerts scheduled.
    pub fn restore_alerts(&self, now: DateTime<Utc>) -> usize {
        self.gateway.cancel_all();

        let scheduled = self
            .store
            .reminders()
            .iter()
            .filter(|reminder| needs_alert(reminder, now))
            .map(|reminder| self.schedule(reminder))
            .filter(|outcome| matches!(outcome, AlertOutcome::Scheduled(_)))
            .count();

        info!("event=alerts_restore module=service status=ok scheduled={scheduled}");
        scheduled
    }

    fn sync_alert(&self, reminder: &Reminder, now: DateTime<Utc>) -> AlertOutcome {
        if needs_alert(reminder, now) {
            self.schedule(reminder)
        } else if reminder.completed {
            self.gateway.cancel(notification_id(reminder))
        } else {
            AlertOutcome::NotNeeded
        }
    }

    fn schedule(&self, reminder: &Reminder) -> AlertOutcome {
        let body = reminder
            .description
            .as_deref()
            .unwrap_or(DEFAULT_ALERT_BODY);
        self.gateway.schedule(
            notification_id(reminder),
            &reminder.title,
            body,
            reminder.due_date,
        )
    }
}

/// Alert id for a reminder, derived from its hyphenated id string.
pub fn notification_id(reminder: &Reminder) -> NotificationId {
    derive_notification_id(&reminder.id.to_string())
}

fn needs_alert(reminder: &Reminder, now: DateTime<Utc>) -> bool {
    !reminder.completed && reminder.due_date > now
}
