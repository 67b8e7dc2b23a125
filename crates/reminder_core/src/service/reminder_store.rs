//! Authoritative in-memory reminder collection.
//!
//! # Responsibility
//! - Own the reminder collection and expose its mutators.
//! - Mirror every mutation to the injected slot storage.
//!
//! # Invariants
//! - The slot is rewritten wholesale after each mutation.
//! - An empty collection clears the slot instead of writing `[]`.
//! - When a write fails the in-memory change is rolled back.
//! - Unreadable payloads load as an empty collection.

use crate::model::reminder::{Reminder, ReminderDraft, ReminderId, ReminderValidationError};
use crate::repo::codec::{decode_reminders, encode_reminders, CodecError};
use crate::repo::slot_storage::{ReminderStorage, StorageError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation failure.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected; nothing changed.
    Validation(ReminderValidationError),
    /// Storage write failed; the in-memory change was rolled back.
    Storage(StorageError),
    /// Collection could not be encoded; the in-memory change was rolled back.
    Codec(CodecError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<ReminderValidationError> for StoreError {
    fn from(value: ReminderValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// Reminder collection bound to one storage slot.
pub struct ReminderStore<S: ReminderStorage> {
    storage: S,
    reminders: Vec<Reminder>,
}

impl<S: ReminderStorage> ReminderStore<S> {
    /// Loads the persisted collection.
    ///
    /// # Errors
    /// - Returns `StorageError` when the slot cannot be read.
    ///
    /// Malformed payloads are logged and treated as an empty collection; the
    /// slot is left untouched until the next mutation.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let reminders = match storage.load()? {
            None => Vec::new(),
            Some(payload) => match decode_reminders(&payload) {
                Ok(reminders) => reminders,
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=fallback reason={} payload_len={}",
                        codec_reason(&err),
                        payload.len()
                    );
                    Vec::new()
                }
            },
        };

        info!(
            "event=store_load module=store status=ok count={}",
            reminders.len()
        );
        Ok(Self { storage, reminders })
    }

    /// Current collection in insertion order.
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn get(&self, id: ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|reminder| reminder.id == id)
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validates `draft`, appends the new reminder and persists.
    pub fn add(&mut self, draft: ReminderDraft) -> StoreResult<Reminder> {
        let mut reminder = draft.into_reminder().map_err(|err| {
            info!("event=store_add module=store status=rejected reason={err}");
            err
        })?;
        while self.get(reminder.id).is_some() {
            reminder.id = Uuid::new_v4();
        }

        self.reminders.push(reminder.clone());
        if let Err(err) = self.persist() {
            self.reminders.pop();
            return Err(err);
        }

        info!(
            "event=store_add module=store status=ok id={} count={}",
            reminder.id,
            self.reminders.len()
        );
        Ok(reminder)
    }

    /// Flips `completed` and persists.
    ///
    /// Returns the new flag, or `None` when `id` is unknown (nothing written).
    pub fn toggle_completion(&mut self, id: ReminderId) -> StoreResult<Option<bool>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        self.reminders[index].completed = !self.reminders[index].completed;
        if let Err(err) = self.persist() {
            self.reminders[index].completed = !self.reminders[index].completed;
            return Err(err);
        }

        let completed = self.reminders[index].completed;
        info!("event=store_toggle module=store status=ok id={id} completed={completed}");
        Ok(Some(completed))
    }

    /// Deletes the reminder and persists.
    ///
    /// Returns the removed record, or `None` when `id` is unknown.
    pub fn remove(&mut self, id: ReminderId) -> StoreResult<Option<Reminder>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let removed = self.reminders.remove(index);
        if let Err(err) = self.persist() {
            self.reminders.insert(index, removed);
            return Err(err);
        }

        info!(
            "event=store_remove module=store status=ok id={id} count={}",
            self.reminders.len()
        );
        Ok(Some(removed))
    }

    /// Writes the whole collection, or clears the slot when it is empty.
    pub fn persist(&self) -> StoreResult<()> {
        let result = if self.reminders.is_empty() {
            self.storage.clear().map_err(StoreError::from)
        } else {
            encode_reminders(&self.reminders)
                .map_err(StoreError::from)
                .and_then(|payload| self.storage.save(&payload).map_err(StoreError::from))
        };

        if let Err(err) = &result {
            error!(
                "event=store_persist module=store status=error count={} error={err}",
                self.reminders.len()
            );
        }
        result
    }

    fn position(&self, id: ReminderId) -> Option<usize> {
        self.reminders.iter().position(|reminder| reminder.id == id)
    }
}

fn codec_reason(err: &CodecError) -> &'static str {
    match err {
        CodecError::Malformed(_) => "malformed",
        CodecError::InvalidRecord { .. } => "invalid_record",
    }
}
