//! Domain model for reminder records.
//!
//! # Responsibility
//! - Define the canonical reminder record and its enumerations.
//! - Own record-level validation shared by create and load paths.
//!
//! # Invariants
//! - Every reminder is identified by a stable `ReminderId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod reminder;
