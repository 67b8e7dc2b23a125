//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Resolution never fails; unusable values fall back to defaults.
//! - Blank variables are treated as unset.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

/// Database file holding the reminders slot.
pub const ENV_DB_PATH: &str = "REMINDERS_DB_PATH";
/// `trace|debug|info|warn|error`.
pub const ENV_LOG_LEVEL: &str = "REMINDERS_LOG_LEVEL";
/// Absolute directory for rolling log files; logging is off when unset.
pub const ENV_LOG_DIR: &str = "REMINDERS_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "reminders.sqlite3";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, which returns a variable's raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = read(ENV_LOG_LEVEL)
            .and_then(|raw| normalize_level(&raw).ok())
            .unwrap_or_else(default_log_level)
            .to_string();
        let log_dir = read(ENV_LOG_DIR).map(PathBuf::from);

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = CoreConfig::from_lookup(lookup(&[]));
        assert!(config.db_path.ends_with("reminders.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_are_trimmed_and_normalized() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, " /data/app/reminders.db "),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, "/data/app/logs"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/app/reminders.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/data/app/logs")));
    }

    #[test]
    fn unknown_level_and_blank_values_fall_back() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "   "),
            (ENV_LOG_LEVEL, "loud"),
        ]));
        assert!(config.db_path.ends_with("reminders.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
    }
}
