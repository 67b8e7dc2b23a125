use reminder_core::db::migrations::latest_version;
use reminder_core::db::{open_db, open_db_in_memory, DbError};
use reminder_core::{ReminderDraft, ReminderStore, SqliteSlotStorage};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_slots");
}

#[test]
fn reopening_database_keeps_schema_and_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.db");

    let created_id = {
        let conn = open_db(&path).unwrap();
        let mut store = ReminderStore::load(SqliteSlotStorage::new(&conn)).unwrap();
        store
            .add(ReminderDraft::new("Dentist", "2030-04-02", "08:15"))
            .unwrap()
            .id
    };

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = ReminderStore::load(SqliteSlotStorage::new(&conn)).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.reminders()[0].id, created_id);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
