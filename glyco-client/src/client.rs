//! The public entry operations.
//!
//! [`EntryClient`] composes the request executor and the codec into the
//! four operations the CLI surface consumes. Each operation performs at
//! most one network round trip and maps every classified HTTP failure into
//! the [`ClientError`] taxonomy without collapsing distinguishable cases.

use std::time::Duration;

use chrono::Utc;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use glyco_core::{Direction, Entry};

use crate::codec::{self, DecodedBatch};
use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::executor::{Outcome, RequestExecutor};

/// Entries endpoint for insert and delete.
pub const ENTRIES_ENDPOINT: &str = "/api/v1/entries";

/// Entries endpoint for list and fetch (JSON rendering).
pub const ENTRIES_LIST_ENDPOINT: &str = "/api/v1/entries.json";

/// Longest response-body excerpt attached to an `Api` error.
const BODY_EXCERPT_CHARS: usize = 200;

// ============================================================================
// Insert Types
// ============================================================================

/// A reading to insert.
#[derive(Debug, Clone)]
pub struct InsertRequest {
    /// Glucose value in the server's native unit.
    pub value: u32,
    /// Reading time in epoch milliseconds; defaults to now when `None`.
    pub timestamp_ms: Option<i64>,
    /// Trend direction, when the caller knows it.
    pub direction: Option<Direction>,
    /// Source device label; defaults to the client identifier.
    pub device: Option<String>,
}

impl InsertRequest {
    /// Creates an insert request for the given value.
    pub fn new(value: u32) -> Self {
        Self {
            value,
            timestamp_ms: None,
            direction: None,
            device: None,
        }
    }

    /// Sets the reading time.
    pub fn at(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    /// Sets the trend direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the source device label.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }
}

/// Result of an insert.
///
/// When the server echoes the persisted record, `entry` carries the
/// server-assigned id and `confirmed` is true. When the server returns no
/// body, `entry` is synthesized from the request (id absent) and
/// `confirmed` is false — re-issuing the insert may create a duplicate, so
/// callers should surface the distinction.
#[derive(Debug, Clone)]
pub struct InsertReceipt {
    /// The inserted entry as the server reported it (or as sent).
    pub entry: Entry,
    /// True if the server echoed the persisted record back.
    pub confirmed: bool,
}

// ============================================================================
// Entry Client
// ============================================================================

/// Typed operations over the server's entries API.
///
/// Stateless and call-scoped: construct one per invocation, no shared
/// mutable state. The client never retries; idempotency notes per
/// operation are in the method docs.
#[derive(Debug, Clone)]
pub struct EntryClient {
    executor: RequestExecutor,
}

impl EntryClient {
    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        Ok(Self {
            executor: RequestExecutor::new(credentials)?,
        })
    }

    /// Creates a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn with_timeout(
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            executor: RequestExecutor::with_timeout(credentials, timeout)?,
        })
    }

    /// Fetches the most recent reading.
    ///
    /// Returns `Ok(None)` when the server has no entries — a valid,
    /// reportable state, not an error. Safe to retry.
    ///
    /// # Errors
    ///
    /// Propagates classified failures from the underlying list request.
    #[instrument(skip(self))]
    pub async fn fetch_latest(&self) -> Result<Option<Entry>, ClientError> {
        let batch = self.list_entries(1).await?;
        Ok(batch.entries.into_iter().next())
    }

    /// Lists the most recent readings, newest first.
    ///
    /// Safe to retry.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` (before any request) if `limit`
    /// is zero; otherwise propagates classified failures.
    #[instrument(skip(self))]
    pub async fn list_entries(&self, limit: u32) -> Result<DecodedBatch, ClientError> {
        if limit == 0 {
            return Err(ClientError::Validation(
                "limit must be a positive integer".to_string(),
            ));
        }

        let outcome = self
            .executor
            .execute(
                Method::GET,
                ENTRIES_LIST_ENDPOINT,
                &[("count", limit.to_string())],
                None,
            )
            .await?;

        match outcome {
            Outcome::Success { body, .. } => {
                let raw = parse_json(&body)?;
                let batch = codec::decode_many(&raw)?;
                debug!(
                    entries = batch.entries.len(),
                    filtered = batch.filtered,
                    skipped = batch.skipped,
                    "Decoded list response"
                );
                Ok(batch)
            }
            Outcome::ClientError { status, body } => Err(http_failure(status, &body)),
            Outcome::ServerError { status } => Err(ClientError::Server { status }),
        }
    }

    /// Inserts a new reading.
    ///
    /// NOT idempotent: re-issuing the same insert may create a duplicate
    /// record. The returned receipt carries the server-assigned id
    /// whenever the server echoed one, so callers can detect duplicates.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` (before any request) for a zero
    /// value or negative timestamp; otherwise propagates classified
    /// failures, including `Decode` for a malformed echo.
    #[instrument(skip(self, request), fields(value = request.value))]
    pub async fn insert_entry(
        &self,
        request: InsertRequest,
    ) -> Result<InsertReceipt, ClientError> {
        if request.value == 0 {
            return Err(ClientError::Validation(
                "glucose value must be a positive integer".to_string(),
            ));
        }
        let timestamp_ms = request
            .timestamp_ms
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        if timestamp_ms < 0 {
            return Err(ClientError::Validation(format!(
                "timestamp must be non-negative, got {timestamp_ms}"
            )));
        }

        let mut entry = Entry::new(request.value, timestamp_ms);
        entry.direction = request.direction.unwrap_or_default();
        entry.device = Some(
            request
                .device
                .unwrap_or_else(|| codec::DEFAULT_DEVICE.to_string()),
        );

        let body = codec::encode(&entry)?;
        let outcome = self
            .executor
            .execute(Method::POST, ENTRIES_ENDPOINT, &[], Some(&body))
            .await?;

        match outcome {
            Outcome::Success { body, .. } => {
                if body.trim().is_empty() {
                    warn!("Server returned no body; insert is unconfirmed");
                    return Ok(InsertReceipt {
                        entry,
                        confirmed: false,
                    });
                }

                let raw = parse_json(&body)?;
                // Servers echo either the persisted record or an array of them
                let echoed = match raw.as_array() {
                    Some(records) => match records.first() {
                        Some(first) => codec::decode_one(first)?,
                        None => {
                            warn!("Server echoed an empty array; insert is unconfirmed");
                            return Ok(InsertReceipt {
                                entry,
                                confirmed: false,
                            });
                        }
                    },
                    None => codec::decode_one(&raw)?,
                };

                Ok(InsertReceipt {
                    entry: echoed,
                    confirmed: true,
                })
            }
            Outcome::ClientError { status, body } => Err(http_failure(status, &body)),
            Outcome::ServerError { status } => Err(ClientError::Server { status }),
        }
    }

    /// Deletes a reading by id.
    ///
    /// Safe to retry; deleting an already-absent id reports `NotFound`,
    /// distinct from other client errors.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` (before any request) for an
    /// empty id, `ClientError::NotFound` for an unknown id, and otherwise
    /// propagates classified failures.
    #[instrument(skip(self))]
    pub async fn delete_entry(&self, id: &str) -> Result<(), ClientError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ClientError::Validation(
                "entry id must not be empty".to_string(),
            ));
        }

        let path = format!("{ENTRIES_ENDPOINT}/{id}");
        let outcome = self.executor.execute(Method::DELETE, &path, &[], None).await?;

        match outcome {
            Outcome::Success { .. } => Ok(()),
            Outcome::ClientError { status: 404, .. } => Err(ClientError::NotFound(
                format!("no entry with id {id:?}"),
            )),
            Outcome::ClientError { status, body } => Err(http_failure(status, &body)),
            Outcome::ServerError { status } => Err(ClientError::Server { status }),
        }
    }
}

// ============================================================================
// Failure Mapping
// ============================================================================

/// Maps a non-2xx, non-5xx status into the error taxonomy.
fn http_failure(status: u16, body: &str) -> ClientError {
    match status {
        401 | 403 => ClientError::Authentication { status },
        _ => ClientError::Api {
            status,
            body: excerpt(body),
        },
    }
}

/// Parses a response body as JSON, reporting malformed bodies as decode
/// failures rather than plumbing errors.
fn parse_json(body: &str) -> Result<Value, ClientError> {
    serde_json::from_str(body)
        .map_err(|e| ClientError::Decode(format!("response body is not valid JSON: {e}")))
}

/// Trims a response body down to an error-message-sized excerpt.
fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= BODY_EXCERPT_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{cut}…")
    }
}

// ============================================================================
// Tests
// ============================================================================
