//! Core error types for focuslog-core.
//!
//! Every fallible operation in the library reports through this hierarchy.
//! Nothing is retried automatically; callers decide what to show the user.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::RunnerState;

/// Core error type for focuslog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any state change
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Session log could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session runner used out of order
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The task label was empty or whitespace only
    #[error("task label must not be empty")]
    EmptyTask,

    /// A bounded setting fell outside its range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: u32,
        max: u32,
    },
}

/// Session log errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file could not be read, created or written
    #[error("session log at {} is unavailable: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row (or the header) of the log could not be parsed
    #[error("session log at {} is corrupt at line {line}: {reason}", path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path key does not name a leaf setting
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No directory could be resolved for application data
    #[error("cannot resolve data directory: {0}")]
    DataDir(String),
}

/// Runner lifecycle errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A runner only ever drives one session
    #[error("session runner is {state:?}; a new runner is needed for every session")]
    NotIdle { state: RunnerState },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
