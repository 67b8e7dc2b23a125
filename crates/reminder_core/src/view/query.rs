//! Search, filter, sort and partition.

use crate::model::reminder::{Category, Priority, Reminder, UnknownVariant};
use std::str::FromStr;

/// Priority filter selected in the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn accepts(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

/// Category filter selected in the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn accepts(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

/// Display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Earliest due first.
    #[default]
    Date,
    /// High, then medium, then low.
    Priority,
}

impl FromStr for SortBy {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "date" => Ok(Self::Date),
            "priority" => Ok(Self::Priority),
            other => Err(UnknownVariant::new("sort", other)),
        }
    }
}

/// Control panel state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderQuery {
    pub search: String,
    pub priority: PriorityFilter,
    pub category: CategoryFilter,
    pub sort_by: SortBy,
}

impl ReminderQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Self::default()
        }
    }
}

/// Filtered and sorted reminders split by completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderView<'a> {
    pub active: Vec<&'a Reminder>,
    pub completed: Vec<&'a Reminder>,
}

impl ReminderView<'_> {
    pub fn len(&self) -> usize {
        self.active.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }
}

/// Whether `reminder` passes the search text and both filters.
pub fn matches(reminder: &Reminder, query: &ReminderQuery) -> bool {
    query.priority.accepts(reminder.priority)
        && query.category.accepts(reminder.category)
        && reminder.matches_text(&query.search)
}

/// Returns matching reminders in collection order.
pub fn filter_reminders<'a>(reminders: &'a [Reminder], query: &ReminderQuery) -> Vec<&'a Reminder> {
    reminders
        .iter()
        .filter(|reminder| matches(reminder, query))
        .collect()
}

/// Stable sort of borrowed reminders.
pub fn sort_reminders(reminders: &mut [&Reminder], sort_by: SortBy) {
    match sort_by {
        SortBy::Date => reminders.sort_by_key(|reminder| reminder.due_date),
        SortBy::Priority => reminders.sort_by_key(|reminder| reminder.priority),
    }
}

/// Filters, sorts and partitions the collection.
pub fn derive_view<'a>(reminders: &'a [Reminder], query: &ReminderQuery) -> ReminderView<'a> {
    let mut visible = filter_reminders(reminders, query);
    sort_reminders(&mut visible, query.sort_by);

    let (completed, active): (Vec<_>, Vec<_>) =
        visible.into_iter().partition(|reminder| reminder.completed);
    ReminderView { active, completed }
}
