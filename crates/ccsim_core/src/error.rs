//! Error types for the simulation core.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Top-level error type for all simulation core errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// A stored setup file is malformed, truncated, or of an unknown version.
    #[error("{file}: {message}")]
    FileFormat {
        /// Name of the offending file or stream.
        file: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// Underlying stream failure other than a short read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reference data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParse {
        /// Path to the file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Invalid request for the current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl SimError {
    /// Create a file format error.
    pub fn file_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Check whether this is a file format error.
    #[must_use]
    pub const fn is_file_format(&self) -> bool {
        matches!(self, Self::FileFormat { .. })
    }
}
