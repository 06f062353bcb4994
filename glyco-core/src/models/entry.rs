//! Entry types.
//!
//! This module contains the canonical glucose observation:
//! - [`Entry`] - A single reading, decoded from or destined for the server
//! - [`EntryKind`] - The server's record discriminator (`type` field)

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::error::CoreError;

// ============================================================================
// Entry Kind
// ============================================================================

/// Record kinds sharing the entries endpoint on a Nightscout server.
///
/// Only [`EntryKind::Sgv`] (sensor glucose value) is handled by this client;
/// other kinds are filtered out when decoding list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EntryKind {
    /// Sensor glucose value.
    Sgv,
    /// Manually entered blood glucose (meter) value.
    Mbg,
    /// Sensor calibration record.
    Cal,
    /// Any other kind the server may grow.
    Other,
}

impl From<String> for EntryKind {
    fn from(s: String) -> Self {
        Self::from_wire(&s)
    }
}

impl EntryKind {
    /// Parses a server `type` string.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "sgv" => Self::Sgv,
            "mbg" => Self::Mbg,
            "cal" => Self::Cal,
            _ => Self::Other,
        }
    }

    /// Returns the server wire name for this kind.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Sgv => "sgv",
            Self::Mbg => "mbg",
            Self::Cal => "cal",
            Self::Other => "other",
        }
    }

    /// Returns true if this client handles records of this kind.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Sgv)
    }
}

// ============================================================================
// Entry
// ============================================================================

/// A single glucose observation.
///
/// Entries read from the server carry a server-assigned `id`; entries built
/// for insertion leave it `None` and the server assigns one. `timestamp_ms`
/// is the authoritative time reference; the wire-level `dateString` is
/// derived from it on encode and never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Server-assigned identifier, absent until the entry is persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Glucose concentration in the server's native unit (mg/dL by default).
    pub value: u32,
    /// Unix epoch milliseconds.
    #[serde(rename = "timestampMillis")]
    pub timestamp_ms: i64,
    /// Trend arrow; `Unknown` when the server did not report one.
    #[serde(default)]
    pub direction: Direction,
    /// Free-text source label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl Entry {
    /// Creates an entry with the given value and timestamp.
    pub fn new(value: u32, timestamp_ms: i64) -> Self {
        Self {
            id: None,
            value,
            timestamp_ms,
            direction: Direction::Unknown,
            device: None,
        }
    }

    /// Sets the server-assigned identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the trend direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the source device label.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Returns true if this entry has been persisted by the server.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the reading time, if the timestamp is representable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_ms).single()
    }

    /// Validates the model invariants.
    ///
    /// The checks exist to catch malformed data crossing the wire boundary,
    /// not to enforce medical limits: the value must be a positive integer
    /// and the timestamp non-negative.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidEntry` when an invariant is violated.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.value == 0 {
            return Err(CoreError::InvalidEntry(
                "glucose value must be positive".to_string(),
            ));
        }
        if self.timestamp_ms < 0 {
            return Err(CoreError::InvalidEntry(format!(
                "timestamp must be non-negative, got {}",
                self.timestamp_ms
            )));
        }
        if let Some(ref id) = self.id {
            if id.is_empty() {
                return Err(CoreError::InvalidEntry(
                    "persisted entry has an empty id".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
