//! Error type for the command-line tools.

use thiserror::Error;

use ccsim_core::error::SimError;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors reported by the tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Error from the simulation core.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// File system error.
    #[error("{path}: {source}")]
    Io {
        /// File being accessed.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// RON text could not be read.
    #[error("{path}: {source}")]
    Ron {
        /// File being parsed.
        path: String,
        /// Underlying error.
        source: ron::error::SpannedError,
    },

    /// Output could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialize(String),

    /// Ship list failed validation.
    #[error("{path}: {count} validation error(s)")]
    Invalid {
        /// File being validated.
        path: String,
        /// Number of problems found.
        count: usize,
    },
}

impl ToolError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
