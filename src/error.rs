//! Error types for structdiff.
//!
//! The diff engine itself cannot fail; only loading documents and writing
//! reports can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur around a diff: reading, parsing, reporting.
#[derive(Debug, Error)]
pub enum DiffError {
    /// A document could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed to open or read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not well-formed
    #[error("cannot parse {origin}: {message}")]
    Parse {
        /// File name or other label of the input
        origin: String,
        /// Parser message
        message: String,
    },

    /// A report could not be serialized
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Result type alias for fallible structdiff operations.
pub type DiffResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Create an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error from any error type.
    pub fn parse(origin: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: err.to_string(),
        }
    }

    /// Create a serialization error from any error type.
    pub fn serialize(err: impl std::error::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}
