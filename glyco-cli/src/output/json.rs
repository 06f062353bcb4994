//! JSON output formatting.

use anyhow::Result;
use chrono::SecondsFormat;
use serde::Serialize;

use glyco_client::{DecodedBatch, InsertReceipt};
use glyco_core::Entry;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a single reading.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value: u32,
    pub timestamp_millis: i64,
    /// RFC 3339 rendering of the timestamp, for humans reading the JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub direction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl From<&Entry> for EntryOutput {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            value: entry.value,
            timestamp_millis: entry.timestamp_ms,
            time: entry
                .timestamp()
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            direction: entry.direction.as_wire().to_string(),
            device: entry.device.clone(),
        }
    }
}

/// JSON output for a list of readings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput {
    pub entries: Vec<EntryOutput>,
    /// Records of unsupported kinds dropped from the response.
    pub filtered: usize,
    /// Malformed records dropped from the response.
    pub skipped: usize,
}

/// JSON output for an insert.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutput {
    pub entry: EntryOutput,
    pub confirmed: bool,
}

/// JSON output for a delete acknowledgment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutput {
    pub id: String,
    pub deleted: bool,
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter with optional pretty-printing.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats a single reading.
    pub fn format_entry(&self, entry: &Entry) -> Result<String> {
        self.render(&EntryOutput::from(entry))
    }

    /// Formats a decoded batch.
    pub fn format_batch(&self, batch: &DecodedBatch) -> Result<String> {
        self.render(&ListOutput {
            entries: batch.entries.iter().map(EntryOutput::from).collect(),
            filtered: batch.filtered,
            skipped: batch.skipped,
        })
    }

    /// Formats an insert receipt.
    pub fn format_receipt(&self, receipt: &InsertReceipt) -> Result<String> {
        self.render(&InsertOutput {
            entry: EntryOutput::from(&receipt.entry),
            confirmed: receipt.confirmed,
        })
    }

    /// Formats a delete acknowledgment.
    pub fn format_deleted(&self, id: &str) -> Result<String> {
        self.render(&DeleteOutput {
            id: id.to_string(),
            deleted: true,
        })
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(output)
    }
}
