//! Persistence layer for the reminder collection.
//!
//! # Responsibility
//! - Define the string-keyed slot contract the store writes through.
//! - Encode/decode the collection payload with schema validation.
//!
//! # Invariants
//! - One slot holds the whole collection; writes replace it wholesale.
//! - An absent slot means an empty collection.

pub mod codec;
pub mod slot_storage;
