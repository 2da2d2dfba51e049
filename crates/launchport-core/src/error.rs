//! Error types for launchport.
//!
//! Decoding never produces one of these: a damaged shortcut list degrades to a
//! partial [`DecodeOutcome`](crate::shortcut::DecodeOutcome). Everything that
//! prevents the output file from being produced is reported here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the launchport library.
#[derive(Debug, Error)]
pub enum ImportError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Codec errors
    #[error("Invalid shortcut entry {field}: {message}")]
    InvalidEntry { field: String, message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },
}

/// Result type alias for launchport operations.
pub type Result<T> = std::result::Result<T, ImportError>;

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl ImportError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ImportError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an invalid-entry error for a named field.
    pub fn invalid_entry(field: impl Into<String>, message: impl Into<String>) -> Self {
        ImportError::InvalidEntry {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the batch can continue after this error.
    ///
    /// Per-record problems only drop the offending record. Anything touching
    /// the output file or the configuration aborts the import.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ImportError::Validation { .. } | ImportError::InvalidEntry { .. }
        )
    }
}
