//! Error types for configuration access.
//!
//! Covers loading failures (I/O, YAML, JSON) and lookups that find a value of
//! the wrong shape.

use thiserror::Error;

/// Errors that can occur while loading or reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value exists at `path` but is not of the expected shape.
    #[error("{path}: expected {expected}")]
    TypeMismatch {
        /// Dotted path of the offending value.
        path: String,
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },

    /// A required value is absent.
    #[error("missing required value: {0}")]
    Missing(String),

    /// A `--set`/`--alias` style assignment in configuration is malformed.
    #[error(transparent)]
    Assignment(#[from] flag_merge_core::AssignmentError),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
