//! Request execution and outcome classification.
//!
//! One network round trip per call, bounded by a timeout, with the raw
//! response classified into success / client error / server error. HTTP
//! failure statuses are classified results, never errors; only transport
//! failures (timeout, DNS, connection refused) and programmer errors
//! surface as `Err`.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::credentials::{Credentials, API_SECRET_HEADER};
use crate::error::ClientError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// Outcome
// ============================================================================

/// A classified HTTP response.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 2xx response.
    Success {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// 4xx response (and any other non-2xx, non-5xx status).
    ClientError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// 5xx response.
    ServerError {
        /// HTTP status code.
        status: u16,
    },
}

impl Outcome {
    /// Classifies a status code and body into an outcome.
    ///
    /// Informational and redirect statuses that survive reqwest's redirect
    /// handling land in `ClientError` so the caller sees the status code.
    pub fn classify(status: u16, body: String) -> Self {
        match status {
            200..=299 => Self::Success { status, body },
            500..=599 => Self::ServerError { status },
            _ => Self::ClientError { status, body },
        }
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. }
            | Self::ClientError { status, .. }
            | Self::ServerError { status } => *status,
        }
    }

    /// Returns true for a 2xx outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

// ============================================================================
// Request Executor
// ============================================================================

/// Builds, authenticates and sends requests against the configured server.
///
/// No retries happen at this layer; every call is exactly one round trip.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    credentials: Credentials,
    http: reqwest::Client,
}

impl RequestExecutor {
    /// Creates an executor with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        Self::with_timeout(credentials, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates an executor with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn with_timeout(
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("glyco/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { credentials, http })
    }

    /// Returns the credentials this executor authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sends one authenticated request and classifies the response.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` when the request never completes
    /// (timeout, DNS failure, connection refused). HTTP failure statuses
    /// are returned as classified [`Outcome`]s instead.
    #[instrument(skip(self, query, body), fields(method = %method, path))]
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Outcome, ClientError> {
        let url = self.credentials.endpoint(path);

        debug!(url = %url, "Issuing request");

        let mut request = self
            .http
            .request(method, &url)
            .header(API_SECRET_HEADER, self.credentials.token());

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let outcome = Outcome::classify(status, body);
        match &outcome {
            Outcome::Success { .. } => {
                debug!(status, "Request succeeded");
            }
            Outcome::ClientError { status, .. } => {
                warn!(status, "Server rejected the request");
            }
            Outcome::ServerError { status } => {
                warn!(status, "Server-side failure");
            }
        }

        Ok(outcome)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success() {
        for status in [200, 201, 204] {
            let outcome = Outcome::classify(status, String::new());
            assert!(outcome.is_success(), "status {status}");
            assert_eq!(outcome.status(), status);
        }
    }

    #[test]
    fn test_classify_client_error() {
        for status in [400, 401, 403, 404, 422] {
            let outcome = Outcome::classify(status, "nope".to_string());
            assert!(
                matches!(outcome, Outcome::ClientError { .. }),
                "status {status}"
            );
        }
    }

    #[test]
    fn test_classify_server_error() {
        for status in [500, 502, 503] {
            let outcome = Outcome::classify(status, String::new());
            assert!(
                matches!(outcome, Outcome::ServerError { .. }),
                "status {status}"
            );
        }
    }

    #[test]
    fn test_classify_redirect_as_client_error() {
        let outcome = Outcome::classify(301, String::new());
        assert!(matches!(outcome, Outcome::ClientError { status: 301, .. }));
    }
}
