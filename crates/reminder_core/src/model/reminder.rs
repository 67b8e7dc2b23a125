//! Reminder domain model.
//!
//! # Responsibility
//! - Define the reminder record, priority/category enums and draft input.
//! - Resolve form date + time input into a concrete instant.
//!
//! # Invariants
//! - `id` is stable and never reused for another reminder.
//! - `title` is non-empty after trimming and at most 100 UTF-16 code units.
//! - `description`, when present, is non-empty and at most 500 UTF-16 code
//!   units.

use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a reminder.
pub type ReminderId = Uuid;

/// Maximum title length, counted in UTF-16 code units like the form field.
pub const TITLE_MAX_LEN: usize = 100;
/// Maximum description length in UTF-16 code units.
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Reminder urgency.
///
/// Declaration order is the display rank: `High` sorts first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(UnknownVariant::new("priority", other)),
        }
    }
}

/// Reminder grouping shown as a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Health,
    Shopping,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Health => "health",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "health" => Ok(Self::Health),
            "shopping" => Ok(Self::Shopping),
            "other" => Ok(Self::Other),
            other => Err(UnknownVariant::new("category", other)),
        }
    }
}

/// Parse error for enum values received as host strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} value `{}`", self.field, self.value)
    }
}

impl Error for UnknownVariant {}

/// Validation failures for reminder input and persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderValidationError {
    EmptyTitle,
    TitleTooLong { len: usize },
    DescriptionTooLong { len: usize },
    /// Date or time input is blank.
    MissingDueDate,
    /// Date + time input could not be resolved to a local instant.
    InvalidDueDate { date: String, time: String },
    DuplicateId(ReminderId),
}

impl Display for ReminderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::TitleTooLong { len } => {
                write!(f, "title has length {len}; at most {TITLE_MAX_LEN} allowed")
            }
            Self::DescriptionTooLong { len } => write!(
                f,
                "description has length {len}; at most {DESCRIPTION_MAX_LEN} allowed"
            ),
            Self::MissingDueDate => write!(f, "date and time are required"),
            Self::InvalidDueDate { date, time } => {
                write!(f, "cannot resolve due date from `{date}` `{time}`")
            }
            Self::DuplicateId(id) => write!(f, "duplicate reminder id: {id}"),
        }
    }
}

impl Error for ReminderValidationError {}

/// Canonical reminder record.
///
/// Field names serialize in camelCase to stay compatible with slots written
/// by the web build of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Serialized as an RFC 3339 string.
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "legacy_category")]
    pub category: Category,
}

fn legacy_category() -> Category {
    Category::Other
}

impl Reminder {
    /// Creates an active reminder with a generated id.
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            due_date,
            completed: false,
            priority: Priority::default(),
            category: Category::Personal,
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        validate_title(&self.title)?;
        if let Some(description) = self.description.as_deref() {
            validate_description(description)?;
        }
        Ok(())
    }

    /// An active reminder whose due time has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date < now
    }

    /// Case-insensitive substring match on title or description.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&needle))
    }
}

/// Raw creation form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`.
    pub time: String,
    pub priority: Priority,
    pub category: Category,
}

impl ReminderDraft {
    pub fn new(title: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date: date.into(),
            time: time.into(),
            priority: Priority::default(),
            category: Category::Personal,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Validates the draft and builds a new active reminder.
    ///
    /// Title and description are trimmed; a blank description becomes `None`.
    pub fn into_reminder(self) -> Result<Reminder, ReminderValidationError> {
        let title = self.title.trim().to_string();
        validate_title(&title)?;

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if let Some(value) = description.as_deref() {
            validate_description(value)?;
        }

        let due_date = resolve_due_date(&self.date, &self.time)?;

        let mut reminder = Reminder::new(title, due_date);
        reminder.description = description;
        reminder.priority = self.priority;
        reminder.category = self.category;
        Ok(reminder)
    }
}

/// Combines local date and time input into a UTC instant.
///
/// Input is interpreted in the device's local time zone. Times skipped by a
/// spring-forward transition are read with the offset in force before the
/// gap, which lands them after it; ambiguous times resolve to the earlier
/// instant.
pub fn resolve_due_date(date: &str, time: &str) -> Result<DateTime<Utc>, ReminderValidationError> {
    resolve_due_date_in(&Local, date, time)
}

pub(crate) fn resolve_due_date_in<Tz: TimeZone>(
    tz: &Tz,
    date: &str,
    time: &str,
) -> Result<DateTime<Utc>, ReminderValidationError> {
    let date = date.trim();
    let time = time.trim();
    if date.is_empty() || time.is_empty() {
        return Err(ReminderValidationError::MissingDueDate);
    }

    let invalid = || ReminderValidationError::InvalidDueDate {
        date: date.to_string(),
        time: time.to_string(),
    };

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
    let clock = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| invalid())?;

    let local = NaiveDateTime::new(day, clock);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Ok(at.with_timezone(&Utc)),
        LocalResult::None => across_gap(tz, local).ok_or_else(invalid),
    }
}

fn across_gap<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    let day_before = local.checked_sub_signed(Duration::days(1))?;
    let offset = tz.offset_from_utc_datetime(&day_before).fix();
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
    Some(Utc.from_utc_datetime(&utc))
}

fn validate_title(title: &str) -> Result<(), ReminderValidationError> {
    if title.trim().is_empty() {
        return Err(ReminderValidationError::EmptyTitle);
    }
    let len = title.encode_utf16().count();
    if len > TITLE_MAX_LEN {
        return Err(ReminderValidationError::TitleTooLong { len });
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ReminderValidationError> {
    let len = description.encode_utf16().count();
    if len > DESCRIPTION_MAX_LEN {
        return Err(ReminderValidationError::DescriptionTooLong { len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        resolve_due_date_in, Priority, Reminder, ReminderDraft, ReminderValidationError,
    };
    use chrono::{
        FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    };

    /// UTC+0 until 2026-03-08 02:00, then UTC+1; local 02:00..03:00 that day
    /// does not exist.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2026, 3, 8)
                .unwrap()
                .and_hms_opt(2, 0, 0)
                .unwrap()
        }

        fn winter() -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }
    }

    fn midnight() -> NaiveTime {
        NaiveTime::from_hms_opt(0, 0, 0).unwrap()
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(midnight()))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let switch = Self::switch();
            if *local < switch {
                LocalResult::Single(Self::winter())
            } else if *local < switch + chrono::Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::summer())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(midnight()))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch() {
                Self::winter()
            } else {
                Self::summer()
            }
        }
    }

    #[test]
    fn resolve_due_date_applies_zone_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let resolved = resolve_due_date_in(&tz, "2026-03-01", "09:30").unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 1, 7, 30, 0).unwrap());
    }

    #[test]
    fn resolve_due_date_accepts_seconds() {
        let resolved = resolve_due_date_in(&Utc, "2026-03-01", "09:30:15").unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 15).unwrap());
    }

    #[test]
    fn resolve_due_date_rejects_blank_and_garbage() {
        assert_eq!(
            resolve_due_date_in(&Utc, "", "09:30").unwrap_err(),
            ReminderValidationError::MissingDueDate
        );
        assert!(matches!(
            resolve_due_date_in(&Utc, "2026-02-30", "09:30").unwrap_err(),
            ReminderValidationError::InvalidDueDate { .. }
        ));
    }

    #[test]
    fn resolve_due_date_moves_skipped_time_past_the_gap() {
        let resolved = resolve_due_date_in(&SpringForward, "2026-03-08", "02:30").unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 8, 2, 30, 0).unwrap());
        assert_eq!(
            resolved.with_timezone(&SpringForward).time(),
            NaiveTime::from_hms_opt(3, 30, 0).unwrap()
        );

        let after = resolve_due_date_in(&SpringForward, "2026-03-08", "03:30").unwrap();
        assert_eq!(after, resolved);
    }

    #[test]
    fn length_limits_count_utf16_units() {
        let at_limit = "\u{1F48A}".repeat(50);
        assert!(ReminderDraft::new(at_limit, "2026-03-01", "09:30")
            .into_reminder()
            .is_ok());

        let over = "\u{1F48A}".repeat(51);
        assert_eq!(
            ReminderDraft::new(over, "2026-03-01", "09:30")
                .into_reminder()
                .unwrap_err(),
            ReminderValidationError::TitleTooLong { len: 102 }
        );
    }

    #[test]
    fn matches_text_ignores_needle_case() {
        let mut reminder = Reminder::new("Buy Milk", Utc::now());
        reminder.description = Some("Two Liters".to_string());
        assert!(reminder.matches_text("MILK"));
        assert!(reminder.matches_text("liters"));
        assert!(!reminder.matches_text("bread"));
    }

    #[test]
    fn draft_trims_and_drops_blank_description() {
        let reminder = ReminderDraft::new("  Buy milk  ", "2026-03-01", "09:30")
            .with_description("   ")
            .into_reminder()
            .unwrap();
        assert_eq!(reminder.title, "Buy milk");
        assert_eq!(reminder.description, None);
        assert!(!reminder.completed);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn priority_orders_high_first_and_defaults_to_medium() {
        assert!(Priority::High < Priority::Medium && Priority::Medium < Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
