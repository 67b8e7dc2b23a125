//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `reminder_core` linkage without the host UI runtime.
//! - Print counters for the configured reminders database.

use reminder_core::db::open_db;
use reminder_core::{
    core_version, init_logging_from_config, ping, CoreConfig, ReminderStats, ReminderStore,
    SqliteSlotStorage,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("reminder_core ping={}", ping());
    println!("reminder_core version={}", core_version());

    let config = CoreConfig::from_env();
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open `{}`: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let store = match ReminderStore::load(SqliteSlotStorage::new(&conn)) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("cannot load reminders: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stats = ReminderStats::compute(store.reminders(), chrono::Utc::now());
    println!("db_path={}", config.db_path.display());
    println!(
        "total={} active={} completed={} overdue={} completion_rate={}%",
        stats.total, stats.active, stats.completed, stats.overdue, stats.completion_rate
    );
    ExitCode::SUCCESS
}
