//! Core domain logic for the reminders app.
//! This crate is the single source of truth for reminder invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod view;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::reminder::{
    resolve_due_date, Category, Priority, Reminder, ReminderDraft, ReminderId,
    ReminderValidationError, UnknownVariant,
};
pub use notify::gateway::{AlertOutcome, NotificationGateway};
pub use notify::id::{derive_notification_id, NotificationId};
pub use notify::memory::InMemoryNotificationPlatform;
pub use notify::platform::{
    NotificationPlatform, NotificationStyle, PermissionState, PlatformError, PlatformResult,
    ScheduledAlert,
};
pub use repo::codec::{decode_reminders, encode_reminders, CodecError};
pub use repo::slot_storage::{
    MemorySlotStorage, ReminderStorage, SqliteSlotStorage, StorageError, StorageResult,
    REMINDERS_SLOT_KEY,
};
pub use service::reminder_service::{notification_id, AlertSynced, ReminderService};
pub use service::reminder_store::{ReminderStore, StoreError, StoreResult};
pub use view::query::{
    derive_view, filter_reminders, matches, sort_reminders, CategoryFilter, PriorityFilter,
    ReminderQuery, ReminderView, SortBy,
};
pub use view::stats::ReminderStats;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
