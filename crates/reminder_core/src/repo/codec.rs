//! Slot payload encoding for the reminder collection.
//!
//! # Responsibility
//! - Serialize the full collection into one JSON array.
//! - Parse persisted payloads into validated records.
//!
//! # Invariants
//! - Decoding rejects the whole payload when any record is invalid.
//! - Ids in a decoded collection are unique.

use crate::model::reminder::{Reminder, ReminderValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Payload encode/decode failures.
#[derive(Debug)]
pub enum CodecError {
    /// Payload is not a JSON array of reminder records.
    Malformed(serde_json::Error),
    /// Record `index` parsed but breaks a reminder invariant.
    InvalidRecord {
        index: usize,
        source: ReminderValidationError,
    },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed reminders payload: {err}"),
            Self::InvalidRecord { index, source } => {
                write!(f, "invalid reminder record at index {index}: {source}")
            }
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
        }
    }
}

/// Serializes the collection as a JSON array.
pub fn encode_reminders(reminders: &[Reminder]) -> Result<String, CodecError> {
    serde_json::to_string(reminders).map_err(CodecError::Malformed)
}

/// Parses and validates a persisted collection.
pub fn decode_reminders(payload: &str) -> Result<Vec<Reminder>, CodecError> {
    let reminders: Vec<Reminder> = serde_json::from_str(payload).map_err(CodecError::Malformed)?;

    let mut seen = HashSet::with_capacity(reminders.len());
    for (index, reminder) in reminders.iter().enumerate() {
        reminder
            .validate()
            .map_err(|source| CodecError::InvalidRecord { index, source })?;
        if !seen.insert(reminder.id) {
            return Err(CodecError::InvalidRecord {
                index,
                source: ReminderValidationError::DuplicateId(reminder.id),
            });
        }
    }

    Ok(reminders)
}

#[cfg(test)]
mod tests {
    use super::{decode_reminders, encode_reminders, CodecError};
    use crate::model::reminder::{Category, Priority, Reminder, ReminderValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn encode_uses_camel_case_and_rfc3339() {
        let due = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let reminder = Reminder::new("Call mom", due);

        let payload = encode_reminders(std::slice::from_ref(&reminder)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(json[0]["dueDate"], "2026-01-02T03:04:05Z");
        assert_eq!(json[0]["completed"], false);
        assert_eq!(json[0]["priority"], "medium");
        assert!(json[0].get("description").is_none());
    }

    #[test]
    fn decode_accepts_web_build_records_without_priority_or_category() {
        let payload = r#"[{
            "id": "11111111-2222-4333-8444-555555555555",
            "title": "Water plants",
            "dueDate": "2026-01-02T03:04:05.000Z",
            "completed": true
        }]"#;

        let reminders = decode_reminders(payload).unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].priority, Priority::Medium);
        assert_eq!(reminders[0].category, Category::Other);
        assert!(reminders[0].completed);
    }

    #[test]
    fn decode_rejects_non_array_and_bad_dates() {
        assert!(matches!(
            decode_reminders(r#"{"id": 1}"#).unwrap_err(),
            CodecError::Malformed(_)
        ));
        let bad_date = r#"[{
            "id": "11111111-2222-4333-8444-555555555555",
            "title": "x",
            "dueDate": "Invalid Date"
        }]"#;
        assert!(matches!(
            decode_reminders(bad_date).unwrap_err(),
            CodecError::Malformed(_)
        ));
    }

    #[test]
    fn decode_rejects_blank_title_and_duplicate_ids() {
        let due = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let mut blank = Reminder::new("ok", due);
        blank.title = "   ".to_string();
        let payload = encode_reminders(&[blank]).unwrap();
        assert!(matches!(
            decode_reminders(&payload).unwrap_err(),
            CodecError::InvalidRecord {
                index: 0,
                source: ReminderValidationError::EmptyTitle
            }
        ));

        let original = Reminder::new("one", due);
        let duplicate = original.clone();
        let payload = encode_reminders(&[original, duplicate]).unwrap();
        assert!(matches!(
            decode_reminders(&payload).unwrap_err(),
            CodecError::InvalidRecord { index: 1, .. }
        ));
    }
}
