//! Environment-driven configuration for the bootstrap binary.

use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "BOOKSTORE_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "BOOKSTORE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "BOOKSTORE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "bookstore.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging is enabled only when this is set.
    pub log_dir: Option<String>,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from a variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_VAR)
                .unwrap_or_else(|| bookstore_core::default_log_level().to_string()),
            log_dir: read(LOG_DIR_VAR),
        }
    }
}
