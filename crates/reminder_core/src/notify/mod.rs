//! Local notification boundary.
//!
//! # Responsibility
//! - Define the platform contract for permission, schedule and cancel calls.
//! - Wrap platform calls so failures degrade to logged status values.
//! - Derive stable numeric alert ids from reminder ids.
//!
//! # Invariants
//! - Gateway calls never return errors or panic; outcomes are status values.
//! - The same reminder id always maps to the same notification id.

pub mod gateway;
pub mod id;
pub mod memory;
pub mod platform;
