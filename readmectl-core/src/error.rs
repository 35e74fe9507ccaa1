/// Structured error types for readmectl-core library.
///
/// Uses `thiserror` for better API surface and error composition.
/// Binary crates (readmectl-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for readmectl-core operations
#[derive(Error, Debug)]
pub enum ReadmeError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Template file could not be used
    #[error("Invalid template {path:?}: {reason}")]
    InvalidTemplate { path: PathBuf, reason: String },

    /// Session file written by an incompatible version
    #[error("Unsupported session version {found} (expected {expected})")]
    SessionVersion { found: u32, expected: u32 },
}

/// Result type alias for readmectl-core operations
pub type Result<T> = std::result::Result<T, ReadmeError>;

impl ReadmeError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create an invalid template error
    pub fn invalid_template(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
