//! Serde serialization/deserialization tests for core types.
//!
//! These tests verify that the canonical types serialize to JSON and
//! deserialize back, preserving all data through the round-trip.

use crate::{Direction, Entry, EntryKind};

// ============================================================================
// Direction Serde Tests
// ============================================================================

#[test]
fn test_direction_serde_roundtrip_all_variants() {
    for direction in [
        Direction::DoubleUp,
        Direction::SingleUp,
        Direction::FortyFiveUp,
        Direction::Flat,
        Direction::FortyFiveDown,
        Direction::SingleDown,
        Direction::DoubleDown,
        Direction::Unknown,
    ] {
        let json = serde_json::to_string(&direction).unwrap();
        let deserialized: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(direction, deserialized, "Round-trip failed for {:?}", direction);
    }
}

#[test]
fn test_direction_deserialize_unrecognized_is_unknown() {
    // Direction uses serde(other) on Unknown
    let result: Direction = serde_json::from_str(r#""NOT COMPUTABLE""#).unwrap();
    assert_eq!(result, Direction::Unknown);
}

// ============================================================================
// EntryKind Serde Tests
// ============================================================================

#[test]
fn test_entry_kind_deserialize_lowercase() {
    let test_cases = vec![
        (r#""sgv""#, EntryKind::Sgv),
        (r#""mbg""#, EntryKind::Mbg),
        (r#""cal""#, EntryKind::Cal),
        (r#""etf""#, EntryKind::Other),
    ];

    for (json, expected) in test_cases {
        let result: EntryKind = serde_json::from_str(json).unwrap();
        assert_eq!(result, expected, "Failed for {}", json);
    }
}

// ============================================================================
// Entry Serde Tests
// ============================================================================

#[test]
fn test_entry_roundtrip() {
    let entry = Entry::new(142, 1_700_000_000_000)
        .with_id("abc123")
        .with_direction(Direction::FortyFiveDown)
        .with_device("xDrip+");

    let json = serde_json::to_string(&entry).unwrap();
    let deserialized: Entry = serde_json::from_str(&json).unwrap();

    assert_eq!(entry, deserialized);
}

#[test]
fn test_entry_serialize_field_names() {
    let entry = Entry::new(95, 1_700_000_000_000).with_id("X1");
    let value = serde_json::to_value(&entry).unwrap();

    assert_eq!(value["id"], "X1");
    assert_eq!(value["value"], 95);
    assert_eq!(value["timestampMillis"], 1_700_000_000_000_i64);
    assert_eq!(value["direction"], "Unknown");
}

#[test]
fn test_entry_serialize_skips_absent_optionals() {
    let entry = Entry::new(95, 0);
    let value = serde_json::to_value(&entry).unwrap();

    assert!(value.get("id").is_none());
    assert!(value.get("device").is_none());
}

#[test]
fn test_entry_deserialize_defaults_direction() {
    let json = r#"{"value": 110, "timestampMillis": 1700000000000}"#;
    let entry: Entry = serde_json::from_str(json).unwrap();

    assert_eq!(entry.direction, Direction::Unknown);
    assert_eq!(entry.id, None);
}
