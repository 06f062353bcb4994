//! Formatter tests.

use glyco_client::{DecodedBatch, InsertReceipt};
use glyco_core::{Direction, Entry};
use serde_json::Value;

use super::{JsonFormatter, TextFormatter};

fn sample_entry() -> Entry {
    Entry::new(118, 1_700_000_000_000)
        .with_id("64f81c9a8e2b4c0004a1d2e3")
        .with_direction(Direction::Flat)
        .with_device("xDrip+")
}

// ============================================================================
// Text Formatter
// ============================================================================

#[test]
fn test_text_entry_line() {
    let formatter = TextFormatter::new(false);
    let line = formatter.format_entry(&sample_entry());

    assert_eq!(line, "2023-11-14T22:13:20Z  118 mg/dL  →  xDrip+");
}

#[test]
fn test_text_entry_without_device() {
    let formatter = TextFormatter::new(false);
    let line = formatter.format_entry(&Entry::new(95, 1_700_000_000_000));

    assert_eq!(line, "2023-11-14T22:13:20Z   95 mg/dL  -");
}

#[test]
fn test_text_colors_wrap_value() {
    let formatter = TextFormatter::new(true);
    let line = formatter.format_entry(&sample_entry());

    // In-range value is green
    assert!(line.contains("\x1b[32m"));
    assert!(line.contains("\x1b[0m"));
}

#[test]
fn test_text_batch_skipped_footer() {
    let formatter = TextFormatter::new(false);
    let batch = DecodedBatch {
        entries: vec![sample_entry()],
        filtered: 0,
        skipped: 2,
    };

    let output = formatter.format_entries(&batch);
    assert!(output.contains("(2 malformed entries skipped)"));
}

#[test]
fn test_text_batch_no_footer_when_clean() {
    let formatter = TextFormatter::new(false);
    let batch = DecodedBatch {
        entries: vec![sample_entry()],
        filtered: 1,
        skipped: 0,
    };

    let output = formatter.format_entries(&batch);
    assert!(!output.contains("skipped"));
}

#[test]
fn test_text_unconfirmed_receipt_warns() {
    let formatter = TextFormatter::new(false);
    let receipt = InsertReceipt {
        entry: Entry::new(142, 1_700_000_000_000),
        confirmed: false,
    };

    let output = formatter.format_receipt(&receipt);
    assert!(output.contains("not confirmed"));
    assert!(output.contains("duplicate"));
}

#[test]
fn test_text_confirmed_receipt_names_id() {
    let formatter = TextFormatter::new(false);
    let receipt = InsertReceipt {
        entry: sample_entry(),
        confirmed: true,
    };

    let output = formatter.format_receipt(&receipt);
    assert!(output.starts_with("Inserted 64f81c9a8e2b4c0004a1d2e3"));
}

// ============================================================================
// JSON Formatter
// ============================================================================

#[test]
fn test_json_entry_fields() {
    let formatter = JsonFormatter::new(false);
    let output = formatter.format_entry(&sample_entry()).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["id"], "64f81c9a8e2b4c0004a1d2e3");
    assert_eq!(value["value"], 118);
    assert_eq!(value["timestampMillis"], 1_700_000_000_000_i64);
    assert_eq!(value["time"], "2023-11-14T22:13:20Z");
    assert_eq!(value["direction"], "Flat");
    assert_eq!(value["device"], "xDrip+");
}

#[test]
fn test_json_entry_omits_absent_id() {
    let formatter = JsonFormatter::new(false);
    let output = formatter
        .format_entry(&Entry::new(95, 1_700_000_000_000))
        .unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert!(value.get("id").is_none());
    assert!(value.get("device").is_none());
}

#[test]
fn test_json_compact_is_single_line() {
    let formatter = JsonFormatter::new(false);
    let output = formatter.format_entry(&sample_entry()).unwrap();
    assert!(!output.contains('\n'));
}

#[test]
fn test_json_pretty_is_multi_line() {
    let formatter = JsonFormatter::new(true);
    let output = formatter.format_entry(&sample_entry()).unwrap();
    assert!(output.contains('\n'));
}

#[test]
fn test_json_batch_counts() {
    let formatter = JsonFormatter::new(false);
    let batch = DecodedBatch {
        entries: vec![sample_entry()],
        filtered: 3,
        skipped: 1,
    };

    let output = formatter.format_batch(&batch).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["entries"].as_array().unwrap().len(), 1);
    assert_eq!(value["filtered"], 3);
    assert_eq!(value["skipped"], 1);
}

#[test]
fn test_json_receipt_confirmed_flag() {
    let formatter = JsonFormatter::new(false);
    let receipt = InsertReceipt {
        entry: Entry::new(142, 1_700_000_000_000),
        confirmed: false,
    };

    let output = formatter.format_receipt(&receipt).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["confirmed"], false);
    assert_eq!(value["entry"]["value"], 142);
}

#[test]
fn test_json_delete_ack() {
    let formatter = JsonFormatter::new(false);
    let output = formatter.format_deleted("abc").unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["id"], "abc");
    assert_eq!(value["deleted"], true);
}
