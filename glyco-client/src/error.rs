//! Client error taxonomy.
//!
//! One variant per distinguishable failure class, so the CLI surface can
//! report each condition differently (and map each to its own exit code).

use thiserror::Error;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid base URL or secret. No request was attempted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied argument violates a precondition. No request was
    /// attempted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed data received from the server.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An entry could not be serialized for insertion.
    #[error("Encode error: {0}")]
    Encode(String),

    /// The targeted resource does not exist on the server.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server rejected the credentials (401/403).
    #[error("Authentication rejected (HTTP {status}); check the API secret")]
    Authentication {
        /// HTTP status code (401 or 403).
        status: u16,
    },

    /// The server rejected the request (other 4xx).
    #[error("Request rejected (HTTP {status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Excerpt of the response body, for diagnosis.
        body: String,
    },

    /// The server failed (5xx). Likely transient.
    #[error("Server error (HTTP {status})")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// The request never completed: timeout, DNS failure, connection
    /// refused. Likely transient or environmental.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON (de)serialization plumbing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core model error.
    #[error("Core error: {0}")]
    Core(#[from] glyco_core::CoreError),
}

impl ClientError {
    /// Returns true if re-issuing the request could plausibly succeed.
    ///
    /// Only server-side failures and transport failures qualify; everything
    /// else is deterministic and a retry would just repeat the failure.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transience() {
        assert!(ClientError::Server { status: 503 }.is_transient());
        assert!(!ClientError::Validation("limit".to_string()).is_transient());
        assert!(!ClientError::Authentication { status: 401 }.is_transient());
        assert!(!ClientError::NotFound("x".to_string()).is_transient());
    }

    #[test]
    fn test_display_carries_status() {
        let err = ClientError::Api {
            status: 422,
            body: "unprocessable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("unprocessable"));
    }
}
