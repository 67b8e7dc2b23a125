//! Aggregate counters for the statistics panel.

use crate::model::reminder::Reminder;
use chrono::{DateTime, Utc};

/// Collection-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    /// Active reminders due before `now`.
    pub overdue: usize,
    /// Rounded percentage in `0..=100`; 0 for an empty collection.
    pub completion_rate: u8,
}

impl ReminderStats {
    pub fn compute(reminders: &[Reminder], now: DateTime<Utc>) -> Self {
        let total = reminders.len();
        let completed = reminders.iter().filter(|reminder| reminder.completed).count();
        let overdue = reminders
            .iter()
            .filter(|reminder| reminder.is_overdue(now))
            .count();

        Self {
            total,
            completed,
            active: total - completed,
            overdue,
            completion_rate: completion_rate(completed, total),
        }
    }
}

/// `round(100 * completed / total)` with halves rounded up.
fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rate = (200 * completed + total) / (2 * total);
    u8::try_from(rate).unwrap_or(100)
}
