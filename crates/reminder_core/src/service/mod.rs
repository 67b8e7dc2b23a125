//! Core use-case services.
//!
//! # Responsibility
//! - Own the reminder collection and its persistence mirror.
//! - Keep scheduled alerts consistent with reminder state.

pub mod reminder_service;
pub mod reminder_store;
