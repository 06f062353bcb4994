//! Wire codec for entry records.
//!
//! Converts between the server's entry representation and the canonical
//! [`Entry`] model, validating required fields on the way in.
//!
//! # Wire Format
//!
//! ```json
//! {
//!   "_id": "64f81c9a8e2b4c0004a1d2e3",
//!   "type": "sgv",
//!   "sgv": 118,
//!   "date": 1700000000000,
//!   "dateString": "2023-11-14T22:13:20.000Z",
//!   "direction": "Flat",
//!   "device": "xDrip+"
//! }
//! ```
//!
//! The entries endpoint is shared by several record kinds (`sgv`, `mbg`,
//! `cal`, ...) and by devices of varying quality, so list decoding is
//! deliberately tolerant: unsupported kinds are filtered, malformed
//! elements are skipped and counted, and only a response that is not a
//! JSON array at all is a fatal decode failure.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use glyco_core::{Direction, Entry, EntryKind};

use crate::error::ClientError;

/// Device label stamped on entries inserted without an explicit source.
pub const DEFAULT_DEVICE: &str = "glyco-cli";

// ============================================================================
// Wire Representation
// ============================================================================

/// An entry as the server sends and receives it.
///
/// Every field is optional at this level; requiredness is enforced when
/// converting to the canonical model. Unknown fields are ignored so newer
/// server schemas keep decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sgv: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<i64>,
    #[serde(rename = "dateString", default, skip_serializing_if = "Option::is_none")]
    date_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device: Option<String>,
}

// ============================================================================
// Decoding
// ============================================================================

/// Result of decoding a list response.
///
/// `filtered` counts records of unsupported kinds (normal on a shared
/// endpoint); `skipped` counts malformed records that were dropped rather
/// than failing the batch.
#[derive(Debug, Clone, Default)]
pub struct DecodedBatch {
    /// Decoded entries, in server order (most recent first).
    pub entries: Vec<Entry>,
    /// Records of a kind this client does not handle.
    pub filtered: usize,
    /// Malformed records dropped from the batch.
    pub skipped: usize,
}

impl DecodedBatch {
    /// Returns true if any malformed records were dropped.
    pub fn has_warnings(&self) -> bool {
        self.skipped > 0
    }
}

/// Decodes a single server record into a canonical entry.
///
/// # Errors
///
/// Returns `ClientError::Decode` if the record is not an object, carries an
/// unsupported `type`, or is missing a positive `sgv` or non-negative
/// `date`.
pub fn decode_one(raw: &Value) -> Result<Entry, ClientError> {
    let wire: WireEntry = serde_json::from_value(raw.clone())
        .map_err(|e| ClientError::Decode(format!("malformed entry record: {e}")))?;

    if let Some(ref kind) = wire.kind {
        if !EntryKind::from_wire(kind).is_supported() {
            return Err(ClientError::Decode(format!(
                "unsupported entry kind {kind:?}"
            )));
        }
    }

    let value = match wire.sgv {
        Some(v) if v > 0 => u32::try_from(v)
            .map_err(|_| ClientError::Decode(format!("sgv {v} out of range")))?,
        Some(v) => {
            return Err(ClientError::Decode(format!(
                "sgv must be a positive integer, got {v}"
            )));
        }
        None => {
            return Err(ClientError::Decode(
                "entry record is missing the sgv field".to_string(),
            ));
        }
    };

    let timestamp_ms = match wire.date {
        Some(ms) if ms >= 0 => ms,
        Some(ms) => {
            return Err(ClientError::Decode(format!(
                "date must be non-negative epoch milliseconds, got {ms}"
            )));
        }
        None => {
            return Err(ClientError::Decode(
                "entry record is missing the date field".to_string(),
            ));
        }
    };

    let mut entry = Entry::new(value, timestamp_ms);
    entry.id = wire.id.filter(|id| !id.is_empty());
    entry.direction = wire
        .direction
        .as_deref()
        .map(Direction::from_wire)
        .unwrap_or_default();
    entry.device = wire.device;

    Ok(entry)
}

/// Decodes a list response, preserving server order.
///
/// Records whose `type` is not `sgv` are filtered out; malformed records
/// are skipped with a warning and counted in the returned batch.
///
/// # Errors
///
/// Returns `ClientError::Decode` only if `raw` is not a JSON array.
pub fn decode_many(raw: &Value) -> Result<DecodedBatch, ClientError> {
    let elements = raw.as_array().ok_or_else(|| {
        ClientError::Decode(format!(
            "expected a JSON array of entries, got {}",
            json_kind(raw)
        ))
    })?;

    let mut batch = DecodedBatch::default();

    for (index, element) in elements.iter().enumerate() {
        if let Some(kind) = element.get("type").and_then(Value::as_str) {
            if !EntryKind::from_wire(kind).is_supported() {
                debug!(index, kind, "Filtering entry of unsupported kind");
                batch.filtered += 1;
                continue;
            }
        }

        match decode_one(element) {
            Ok(entry) => batch.entries.push(entry),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed entry in list response");
                batch.skipped += 1;
            }
        }
    }

    Ok(batch)
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes an entry for insertion.
///
/// The output never carries an `_id` (the server assigns one), always
/// carries `type: "sgv"`, and defaults the device label when the entry has
/// none. `dateString` is derived from the authoritative timestamp.
///
/// # Errors
///
/// Returns `ClientError::Encode` if the value is zero or the timestamp is
/// negative.
pub fn encode(entry: &Entry) -> Result<Value, ClientError> {
    if entry.value == 0 {
        return Err(ClientError::Encode(
            "glucose value must be a positive integer".to_string(),
        ));
    }
    if entry.timestamp_ms < 0 {
        return Err(ClientError::Encode(format!(
            "timestamp must be non-negative, got {}",
            entry.timestamp_ms
        )));
    }

    let wire = WireEntry {
        id: None,
        kind: Some(EntryKind::Sgv.as_wire().to_string()),
        sgv: Some(i64::from(entry.value)),
        date: Some(entry.timestamp_ms),
        date_string: entry
            .timestamp()
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        direction: entry
            .direction
            .is_known()
            .then(|| entry.direction.as_wire().to_string()),
        device: Some(
            entry
                .device
                .clone()
                .unwrap_or_else(|| DEFAULT_DEVICE.to_string()),
        ),
    };

    Ok(serde_json::to_value(wire)?)
}

/// Names a JSON value's shape for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================
