//! Derived views over the reminder collection.
//!
//! # Responsibility
//! - Filter, sort and partition reminders for list rendering.
//! - Compute aggregate statistics.
//!
//! # Invariants
//! - Functions are pure: same snapshot and `now` give the same output.
//! - Input slices are never mutated; views borrow records.

pub mod query;
pub mod stats;
