//! Core Error Types
//!
//! Defines the foundational error types used across the Supplement Advisor
//! workspace. These error types are dependency-free (only thiserror + std) to
//! keep the core crate lightweight.
//!
//! The application crate extends these with variants for configuration,
//! file I/O and the generative backend.

use thiserror::Error;

/// Core error type for the Supplement Advisor workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors (rejected answers, malformed step catalogs)
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}

/// A generative-backend reply that could not be turned into the expected shape.
///
/// Raised by the validators in [`crate::schema`]. The whole reply is rejected;
/// callers never see a partial parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid response format: {reason}")]
pub struct SchemaError {
    pub reason: String,
}

impl SchemaError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
