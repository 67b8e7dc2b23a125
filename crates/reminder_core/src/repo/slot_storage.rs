//! Slot storage contract and implementations.
//!
//! # Responsibility
//! - Provide load/save/clear over one string-keyed storage slot.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save` replaces the previous payload entirely.
//! - `clear` on an absent slot is a no-op.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used for the reminder collection.
pub const REMINDERS_SLOT_KEY: &str = "reminders";

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport failure from the backing storage.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused the operation (test doubles, read-only media).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value slot holding the serialized reminder collection.
pub trait ReminderStorage {
    /// Returns the stored payload, or `None` when the slot is absent.
    fn load(&self) -> StorageResult<Option<String>>;
    /// Replaces the stored payload.
    fn save(&self, payload: &str) -> StorageResult<()>;
    /// Removes the slot entirely.
    fn clear(&self) -> StorageResult<()>;
}

impl<T: ReminderStorage + ?Sized> ReminderStorage for &T {
    fn load(&self) -> StorageResult<Option<String>> {
        (**self).load()
    }

    fn save(&self, payload: &str) -> StorageResult<()> {
        (**self).save(payload)
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }
}

/// SQLite-backed slot in the `kv_slots` table.
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteSlotStorage<'conn> {
    /// Uses the default reminders slot.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, REMINDERS_SLOT_KEY)
    }

    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ReminderStorage for SqliteSlotStorage<'_> {
    fn load(&self) -> StorageResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM kv_slots WHERE slot_key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save(&self, payload: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (slot_key, payload) VALUES (?1, ?2)
             ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.key.as_str(), payload],
        )?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE slot_key = ?1;", [self.key.as_str()])?;
        Ok(())
    }
}

/// Process-local slot used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slot: RefCell<Option<String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a pre-filled slot.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(payload.into())),
        }
    }

    /// Returns a copy of the current payload.
    pub fn snapshot(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ReminderStorage for MemorySlotStorage {
    fn load(&self) -> StorageResult<Option<String>> {
        Ok(self.snapshot())
    }

    fn save(&self, payload: &str) -> StorageResult<()> {
        *self.slot.borrow_mut() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}
