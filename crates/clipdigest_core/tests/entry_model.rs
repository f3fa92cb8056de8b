use clipdigest_core::normalize::compare::{content_hash, normalize_for_compare, split_clauses};
use clipdigest_core::{Entry, EntryKind, LocationRange};

fn sample_entry() -> Entry {
    let body = "The quick brown fox.".to_string();
    let normalized = normalize_for_compare(&body);
    Entry {
        sequence_index: 7,
        document_title: "Rust in Action (Tim McNamara)".to_string(),
        kind: EntryKind::Highlight,
        metadata_raw: "- Your Highlight on page 5 | Location 100-110 | Added on 2026-01-16 11:20:40"
            .to_string(),
        location: Some(LocationRange::new(100, 110)),
        timestamp_raw: Some("2026-01-16 11:20:40".to_string()),
        timestamp_epoch: Some(1_768_562_440),
        body,
        content_hash: content_hash(&normalized),
        clauses: split_clauses(&normalized),
        normalized_body: normalized,
    }
}

#[test]
fn entry_serialization_uses_expected_wire_fields() {
    let entry = sample_entry();

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["sequence_index"], 7);
    assert_eq!(json["type"], "highlight");
    assert_eq!(json["location"]["start"], 100);
    assert_eq!(json["location"]["end"], 110);
    assert_eq!(json["timestamp_epoch"], 1_768_562_440_i64);
    assert_eq!(json["body"], "The quick brown fox.");
    assert_eq!(json["normalized_body"], "The quick brown fox");
    assert_eq!(json["clauses"], serde_json::json!(["The quick brown fox"]));

    let decoded: Entry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn kind_variants_serialize_snake_case() {
    assert_eq!(
        serde_json::to_value(EntryKind::Unknown).unwrap(),
        serde_json::json!("unknown")
    );
    assert_eq!(
        serde_json::to_value(EntryKind::Bookmark).unwrap(),
        serde_json::json!("bookmark")
    );
}

#[test]
fn derived_fields_are_functions_of_body() {
    let entry = sample_entry();
    assert_eq!(entry.normalized_body, normalize_for_compare(&entry.body));
    assert_eq!(entry.content_hash, content_hash(&entry.normalized_body));
    assert_eq!(entry.clauses, split_clauses(&entry.normalized_body));
    assert_eq!(entry.content_hash.len(), 64);
}
