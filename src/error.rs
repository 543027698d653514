//! Error types for source loading and analysis.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by an analyzer adapter instead of returning a structured result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The analysis engine raised with a message.
    #[error("{0}")]
    Message(String),

    /// The engine's payload could not be decoded.
    #[error("Malformed analyzer output: {0}")]
    Decode(String),
}

impl AdapterError {
    /// Create an error from an engine message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Create a payload decoding error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

/// Errors that can occur at the coordinator boundary.
///
/// Only [`CoordinatorError::InvalidFile`] is ever returned to a caller; the
/// adapter-side variants are absorbed into the coordinator state and surface
/// as `last_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// A load was rejected because the filename lacks the required suffix.
    #[error("Invalid file: \"{filename}\" is not a {required_suffix} file")]
    InvalidFile {
        filename: String,
        required_suffix: String,
    },

    /// The adapter raised instead of returning a result.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// The adapter did not answer within the configured timeout.
    #[error("Analysis timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The adapter panicked.
    #[error("Analysis failed")]
    Panicked,
}

impl CoordinatorError {
    /// Create a filename validation error.
    pub fn invalid_file(filename: impl Into<String>, required_suffix: impl Into<String>) -> Self {
        Self::InvalidFile {
            filename: filename.into(),
            required_suffix: required_suffix.into(),
        }
    }

    /// Whether this error came from validating a load request.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidFile { .. })
    }
}
