//! Core error types for `glyco`.

use thiserror::Error;

/// Core error type for `glyco` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entry violates a model invariant.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
