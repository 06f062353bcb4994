//! Text output formatting with trend arrows and colors.

use chrono::SecondsFormat;

use glyco_client::{DecodedBatch, InsertReceipt};
use glyco_core::Entry;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Display label for the server's native unit.
const UNITS: &str = "mg/dL";

// Display thresholds in mg/dL. Coloring only - the client layer never
// judges values beyond "positive integer".
const URGENT_LOW: u32 = 55;
const LOW: u32 = 70;
const HIGH: u32 = 180;
const URGENT_HIGH: u32 = 250;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a single reading as one line.
    ///
    /// `2023-11-14T22:13:20Z  118 mg/dL  →  xDrip+`
    pub fn format_entry(&self, entry: &Entry) -> String {
        let time = entry
            .timestamp()
            .map_or_else(
                || entry.timestamp_ms.to_string(),
                |t| t.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        let value = self.color_for_value(entry.value, &format!("{:>3}", entry.value));

        let mut line = format!("{time}  {value} {UNITS}  {}", entry.direction.arrow());
        if let Some(device) = &entry.device {
            line.push_str("  ");
            line.push_str(&self.dim(device));
        }
        line
    }

    /// Formats a decoded batch, one line per reading, plus a footer when
    /// malformed records were skipped.
    pub fn format_entries(&self, batch: &DecodedBatch) -> String {
        let mut lines: Vec<String> = batch
            .entries
            .iter()
            .map(|entry| self.format_entry(entry))
            .collect();

        if batch.skipped > 0 {
            let noun = if batch.skipped == 1 { "entry" } else { "entries" };
            lines.push(self.dim(&format!("({} malformed {noun} skipped)", batch.skipped)));
        }

        lines.join("\n")
    }

    /// Formats an insert receipt.
    pub fn format_receipt(&self, receipt: &InsertReceipt) -> String {
        let entry_line = self.format_entry(&receipt.entry);
        if receipt.confirmed {
            let id = receipt.entry.id.as_deref().unwrap_or("(no id)");
            format!("Inserted {}\n{entry_line}", self.bold(id))
        } else {
            format!(
                "{}\n{entry_line}",
                self.yellow(
                    "Insert accepted but not confirmed by the server; re-running may create a duplicate"
                )
            )
        }
    }

    /// Formats a delete acknowledgment.
    pub fn format_deleted(&self, id: &str) -> String {
        format!("Deleted {}", self.bold(id))
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn color_for_value(&self, value: u32, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        let color = match value {
            v if v < URGENT_LOW || v > URGENT_HIGH => RED,
            v if v < LOW || v > HIGH => YELLOW,
            _ => GREEN,
        };
        format!("{color}{text}{RESET}")
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.use_colors {
            format!("{YELLOW}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
