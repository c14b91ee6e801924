//! Error types for project generation
//!
//! Only conditions that abort a generation pass are errors here. Units that
//! cannot be placed in the project graph are reported as exclusions instead.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for project generation operations
#[derive(Error, Debug)]
pub enum GenError {
    /// IO errors (descriptor writes, directory scans, manifest reads)
    #[error("IO error: {message} ({path:?})")]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing errors for the unit manifest or the options file
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The unit manifest parsed but violates its contract
    #[error("Invalid unit manifest: {message}")]
    InvalidManifest { message: String },

    /// The project root does not exist or is not a directory
    #[error("Invalid project root: {path:?}")]
    InvalidProjectRoot { path: PathBuf },
}

/// Result type alias for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Helper trait for converting IO errors with context
pub trait IoContext<T> {
    fn with_io_context(self, message: &str, path: &Path) -> GenResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, message: &str, path: &Path) -> GenResult<T> {
        self.map_err(|e| GenError::Io {
            message: message.to_string(),
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Helper trait for converting JSON errors with context
pub trait JsonContext<T> {
    fn with_json_context(self, message: &str) -> GenResult<T>;
}

impl<T> JsonContext<T> for Result<T, serde_json::Error> {
    fn with_json_context(self, message: &str) -> GenResult<T> {
        self.map_err(|e| GenError::Json {
            message: message.to_string(),
            source: e,
        })
    }
}
