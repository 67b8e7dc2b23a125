//! FFI use-case API for host-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level reminder functions to the host UI.
//! - Bridge local alerts through an in-process pending table the host mirrors.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Store access is serialized; each call loads, mutates and persists
//!   the slot under one process-wide lock.

use chrono::Utc;
use log::warn;
use reminder_core::db::open_db;
use reminder_core::{
    core_version as core_version_inner, derive_view, init_logging as init_logging_inner,
    ping as ping_inner, AlertOutcome, Category, CategoryFilter, CoreConfig,
    InMemoryNotificationPlatform, NotificationGateway, NotificationPlatform, PermissionState,
    Priority, PriorityFilter, Reminder, ReminderDraft, ReminderId, ReminderQuery,
    ReminderService, ReminderStats, ReminderStore, SortBy, SqliteSlotStorage,
};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

static CONFIG: OnceLock<CoreConfig> = OnceLock::new();
static HOST_PLATFORM: OnceLock<InMemoryNotificationPlatform> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One reminder row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub reminder_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Due instant in Unix epoch milliseconds.
    pub due_epoch_ms: i64,
    pub completed: bool,
    /// `high|medium|low`.
    pub priority: String,
    /// `work|personal|health|shopping|other`.
    pub category: String,
    pub overdue: bool,
}

/// Statistics panel counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderStatsItem {
    pub total: u32,
    pub active: u32,
    pub completed: u32,
    pub overdue: u32,
    pub completion_rate: u8,
}

/// List response with active/completed partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderListResponse {
    pub ok: bool,
    pub active: Vec<ReminderItem>,
    pub completed: Vec<ReminderItem>,
    /// Computed over the whole collection, not the filtered view.
    pub stats: ReminderStatsItem,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderActionResponse {
    pub ok: bool,
    pub reminder_id: Option<String>,
    pub message: String,
    /// Alert sync result label (`scheduled|cancelled|permission_denied|not_needed|failed`).
    pub alert: Option<String>,
}

impl ReminderActionResponse {
    fn success(
        message: impl Into<String>,
        reminder_id: Option<String>,
        alert: &AlertOutcome,
    ) -> Self {
        Self {
            ok: true,
            reminder_id,
            message: message.into(),
            alert: Some(alert_label(alert).to_string()),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            reminder_id: None,
            message: message.into(),
            alert: None,
        }
    }
}

/// Pending alert the host must mirror into the OS notification center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAlertItem {
    pub notification_id: u32,
    pub title: String,
    pub body: String,
    pub fire_at_epoch_ms: i64,
    pub sound: String,
    pub small_icon: String,
    pub icon_color: String,
}

/// Lists reminders for the control panel state.
///
/// Filter inputs accept `all` or an empty string for "no filter".
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown filter values return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_list(
    search: String,
    priority: String,
    category: String,
    sort_by: String,
) -> ReminderListResponse {
    let query = match parse_query(search, &priority, &category, &sort_by) {
        Ok(query) => query,
        Err(message) => return list_failure(message),
    };

    let result = with_service(|service| {
        let reminders = service.store().reminders();
        let now = Utc::now();
        let view = derive_view(reminders, &query);
        let stats = ReminderStats::compute(reminders, now);
        let active = view
            .active
            .into_iter()
            .map(|reminder| to_item(reminder, now))
            .collect::<Vec<_>>();
        let completed = view
            .completed
            .into_iter()
            .map(|reminder| to_item(reminder, now))
            .collect::<Vec<_>>();
        Ok((active, completed, to_stats_item(&stats)))
    });

    match result {
        Ok((active, completed, stats)) => {
            let message = if stats.total == 0 {
                "No reminders yet.".to_string()
            } else {
                format!(
                    "Showing {} of {} reminder(s).",
                    active.len() + completed.len(),
                    stats.total
                )
            };
            ReminderListResponse {
                ok: true,
                active,
                completed,
                stats,
                message,
            }
        }
        Err(message) => list_failure(format!("reminders_list failed: {message}")),
    }
}

/// Creates a reminder from the creation form.
///
/// `priority` defaults to `medium`, `category` to `personal`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Validation failures return `ok=false` with a user-facing message.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_create(
    title: String,
    description: Option<String>,
    date: String,
    time: String,
    priority: Option<String>,
    category: Option<String>,
) -> ReminderActionResponse {
    let mut draft = ReminderDraft::new(title, date, time);
    draft.description = description;
    if let Some(raw) = priority.as_deref().filter(|value| !value.trim().is_empty()) {
        match raw.parse::<Priority>() {
            Ok(value) => draft.priority = value,
            Err(err) => {
                return ReminderActionResponse::failure(format!("reminder_create failed: {err}"))
            }
        }
    }
    if let Some(raw) = category.as_deref().filter(|value| !value.trim().is_empty()) {
        match raw.parse::<Category>() {
            Ok(value) => draft.category = value,
            Err(err) => {
                return ReminderActionResponse::failure(format!("reminder_create failed: {err}"))
            }
        }
    }

    match with_service(|service| {
        service
            .create(draft, Utc::now())
            .map_err(|err| err.to_string())
    }) {
        Ok(created) => ReminderActionResponse::success(
            "Reminder created.",
            Some(created.value.id.to_string()),
            &created.alert,
        ),
        Err(err) => ReminderActionResponse::failure(format!("reminder_create failed: {err}")),
    }
}

/// Flips completion for one reminder.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_toggle(reminder_id: String) -> ReminderActionResponse {
    let id = match parse_reminder_id(&reminder_id) {
        Ok(id) => id,
        Err(message) => return ReminderActionResponse::failure(message),
    };

    match with_service(|service| {
        service
            .toggle(id, Utc::now())
            .map_err(|err| err.to_string())
    }) {
        Ok(toggled) => {
            let message = match toggled.value {
                Some(true) => "Reminder completed.",
                Some(false) => "Reminder reopened.",
                None => "Reminder not found.",
            };
            ReminderActionResponse::success(message, Some(id.to_string()), &toggled.alert)
        }
        Err(err) => ReminderActionResponse::failure(format!("reminder_toggle failed: {err}")),
    }
}

/// Deletes one reminder; deleting an unknown id succeeds as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_delete(reminder_id: String) -> ReminderActionResponse {
    let id = match parse_reminder_id(&reminder_id) {
        Ok(id) => id,
        Err(message) => return ReminderActionResponse::failure(message),
    };

    match with_service(|service| service.delete(id).map_err(|err| err.to_string())) {
        Ok(deleted) => {
            let message = if deleted.value.is_some() {
                "Reminder deleted."
            } else {
                "Reminder not found."
            };
            ReminderActionResponse::success(message, Some(id.to_string()), &deleted.alert)
        }
        Err(err) => ReminderActionResponse::failure(format!("reminder_delete failed: {err}")),
    }
}

/// Records the OS permission answer obtained by the host.
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_set_permission(granted: bool) {
    let state = if granted {
        PermissionState::Granted
    } else {
        PermissionState::Denied
    };
    host_platform().set_permission(state);
}

/// Lists alerts the host should have registered with the OS.
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_pending() -> Vec<PendingAlertItem> {
    match host_platform().pending() {
        Ok(alerts) => alerts
            .into_iter()
            .map(|alert| PendingAlertItem {
                notification_id: alert.id,
                title: alert.title,
                body: alert.body,
                fire_at_epoch_ms: alert.fire_at.timestamp_millis(),
                sound: alert.style.sound,
                small_icon: alert.style.small_icon,
                icon_color: alert.style.icon_color,
            })
            .collect(),
        Err(err) => {
            warn!("event=ffi_pending module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Rebuilds pending alerts from stored reminders (app start).
#[flutter_rust_bridge::frb(sync)]
pub fn notifications_restore() -> ReminderActionResponse {
    match with_service(|service| Ok(service.restore_alerts(Utc::now()))) {
        Ok(count) => ReminderActionResponse {
            ok: true,
            reminder_id: None,
            message: format!("Scheduled {count} alert(s)."),
            alert: None,
        },
        Err(err) => {
            ReminderActionResponse::failure(format!("notifications_restore failed: {err}"))
        }
    }
}

type HostService<'conn> =
    ReminderService<SqliteSlotStorage<'conn>, &'static InMemoryNotificationPlatform>;

fn with_service<T>(
    f: impl FnOnce(&mut HostService<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn =
        open_db(&config().db_path).map_err(|err| format!("reminders DB open failed: {err}"))?;
    let store = ReminderStore::load(SqliteSlotStorage::new(&conn))
        .map_err(|err| format!("reminders load failed: {err}"))?;
    let mut service = ReminderService::new(store, NotificationGateway::new(host_platform()));
    f(&mut service)
}

fn config() -> &'static CoreConfig {
    CONFIG.get_or_init(CoreConfig::from_env)
}

fn host_platform() -> &'static InMemoryNotificationPlatform {
    HOST_PLATFORM.get_or_init(InMemoryNotificationPlatform::default)
}

fn parse_query(
    search: String,
    priority: &str,
    category: &str,
    sort_by: &str,
) -> Result<ReminderQuery, String> {
    Ok(ReminderQuery {
        search: search.trim().to_string(),
        priority: priority
            .parse::<PriorityFilter>()
            .map_err(|err| err.to_string())?,
        category: category
            .parse::<CategoryFilter>()
            .map_err(|err| err.to_string())?,
        sort_by: sort_by.parse::<SortBy>().map_err(|err| err.to_string())?,
    })
}

fn parse_reminder_id(raw: &str) -> Result<ReminderId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid reminder id `{}`", raw.trim()))
}

fn list_failure(message: String) -> ReminderListResponse {
    ReminderListResponse {
        ok: false,
        active: Vec::new(),
        completed: Vec::new(),
        stats: ReminderStatsItem::default(),
        message,
    }
}

fn to_item(reminder: &Reminder, now: chrono::DateTime<Utc>) -> ReminderItem {
    ReminderItem {
        reminder_id: reminder.id.to_string(),
        title: reminder.title.clone(),
        description: reminder.description.clone(),
        due_epoch_ms: reminder.due_date.timestamp_millis(),
        completed: reminder.completed,
        priority: reminder.priority.as_str().to_string(),
        category: reminder.category.as_str().to_string(),
        overdue: reminder.is_overdue(now),
    }
}

fn to_stats_item(stats: &ReminderStats) -> ReminderStatsItem {
    let clamp = |value: usize| u32::try_from(value).unwrap_or(u32::MAX);
    ReminderStatsItem {
        total: clamp(stats.total),
        active: clamp(stats.active),
        completed: clamp(stats.completed),
        overdue: clamp(stats.overdue),
        completion_rate: stats.completion_rate,
    }
}

fn alert_label(outcome: &AlertOutcome) -> &'static str {
    match outcome {
        AlertOutcome::Scheduled(_) => "scheduled",
        AlertOutcome::Cancelled(_) => "cancelled",
        AlertOutcome::PermissionDenied => "permission_denied",
        AlertOutcome::NotNeeded => "not_needed",
        AlertOutcome::Failed(_) => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, notifications_pending, notifications_set_permission, ping,
        reminder_create, reminder_delete, reminder_toggle, reminders_list,
    };
    use reminder_core::derive_notification_id;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn create_then_list_finds_reminder_by_search() {
        let token = unique_token("ffi-list");
        let created = reminder_create(
            format!("Buy milk {token}"),
            Some("two liters".to_string()),
            "2099-12-31".to_string(),
            "23:59".to_string(),
            Some("high".to_string()),
            Some("shopping".to_string()),
        );
        assert!(created.ok, "{}", created.message);
        let created_id = created.reminder_id.clone().expect("reminder id");

        let listed = reminders_list(
            token,
            "high".to_string(),
            "all".to_string(),
            "date".to_string(),
        );
        assert!(listed.ok, "{}", listed.message);
        let item = listed
            .active
            .iter()
            .find(|item| item.reminder_id == created_id)
            .expect("created reminder should be listed");
        assert_eq!(item.category, "shopping");
        assert!(!item.overdue);
        assert!(listed.stats.total >= 1);

        reminder_delete(created_id);
    }

    #[test]
    fn create_rejects_blank_title_and_unknown_priority() {
        let blank = reminder_create(
            "   ".to_string(),
            None,
            "2099-12-31".to_string(),
            "10:00".to_string(),
            None,
            None,
        );
        assert!(!blank.ok);
        assert!(blank.message.contains("title"));

        let bad_priority = reminder_create(
            "ok".to_string(),
            None,
            "2099-12-31".to_string(),
            "10:00".to_string(),
            Some("urgent".to_string()),
            None,
        );
        assert!(!bad_priority.ok);
        assert!(bad_priority.message.contains("priority"));
    }

    #[test]
    fn toggle_and_delete_keep_alerts_in_sync() {
        notifications_set_permission(true);
        let created = reminder_create(
            unique_token("ffi-toggle"),
            None,
            "2099-06-01".to_string(),
            "08:00".to_string(),
            None,
            None,
        );
        assert!(created.ok, "{}", created.message);
        assert_eq!(created.alert.as_deref(), Some("scheduled"));
        let id = created.reminder_id.expect("reminder id");
        let alert_id = derive_notification_id(&id);
        assert!(notifications_pending()
            .iter()
            .any(|alert| alert.notification_id == alert_id));

        let toggled = reminder_toggle(id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert_eq!(toggled.message, "Reminder completed.");
        assert!(!notifications_pending()
            .iter()
            .any(|alert| alert.notification_id == alert_id));

        let deleted = reminder_delete(id.clone());
        assert_eq!(deleted.message, "Reminder deleted.");
        let again = reminder_delete(id);
        assert!(again.ok);
        assert_eq!(again.message, "Reminder not found.");
    }

    #[test]
    fn invalid_inputs_return_failure_envelopes() {
        assert!(!reminder_toggle("not-a-uuid".to_string()).ok);
        let listed = reminders_list(
            String::new(),
            "all".to_string(),
            "all".to_string(),
            "size".to_string(),
        );
        assert!(!listed.ok);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
