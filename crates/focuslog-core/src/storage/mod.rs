mod config;
mod csv;
pub mod log_store;

pub use config::{Config, StorageConfig, TimerConfig};
pub use log_store::{CorruptRow, LoadReport, LogStore};

use std::path::PathBuf;

use crate::error::{ConfigError, StorageError};
use crate::session::SessionRecord;

/// Append-only persistence for completed sessions.
///
/// Implementations never reorder, deduplicate, or edit individual records.
/// Whole-log deletion is the only removal.
pub trait SessionLog {
    /// Add one record to the end of the log, durably.
    fn append(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// All records in append order. An absent log is an empty log.
    fn load_all(&self) -> Result<Vec<SessionRecord>, StorageError>;

    /// Delete every record.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Returns the application data directory.
///
/// `FOCUSLOG_DATA_DIR` wins when set. Otherwise `~/.config/focuslog[-dev]/`
/// based on `FOCUSLOG_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FOCUSLOG_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSLOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focuslog-dev")
            } else {
                base_dir.join("focuslog")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
