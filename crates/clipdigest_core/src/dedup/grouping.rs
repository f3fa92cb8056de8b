//! Per-document retention and ordering.
//!
//! # Responsibility
//! - Partition entries by document and apply kind-specific retention.
//! - Produce the deterministic final ordering per document.
//!
//! # Invariants
//! - Retention scans entries newest export position first, so the later of
//!   two duplicates survives.
//! - Highlights and unknown-kind entries share one retention set; notes and
//!   bookmarks keep by exact identity only.
//! - Empty-body entries never reach retention, regardless of kind.

use crate::dedup::classifier::{is_duplicate, DedupConfig};
use crate::model::entry::{Entry, EntryKind};
use log::debug;
use std::collections::BTreeMap;

/// Deduplicates entries and groups survivors by document title.
///
/// Documents whose entries are all filtered away are omitted from the
/// result. Iteration order over the mapping is by title; it carries no
/// semantic meaning.
pub fn dedup_entries(entries: Vec<Entry>, config: &DedupConfig) -> BTreeMap<String, Vec<Entry>> {
    let mut by_document: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        by_document
            .entry(entry.document_title.clone())
            .or_default()
            .push(entry);
    }

    let mut result = BTreeMap::new();
    for (title, document_entries) in by_document {
        let kept = retain_document(document_entries, config);
        if !kept.is_empty() {
            result.insert(title, kept);
        }
    }
    result
}

/// Folds one document's entries, newest export position first, into
/// per-kind kept sets, then orders the survivors.
fn retain_document(entries: Vec<Entry>, config: &DedupConfig) -> Vec<Entry> {
    let mut kept_highlights: Vec<Entry> = Vec::new();
    let mut kept_notes: Vec<Entry> = Vec::new();
    let mut kept_bookmarks: Vec<Entry> = Vec::new();

    for entry in entries.into_iter().rev() {
        if entry.body.is_empty() {
            if config.trace {
                debug!(
                    "event=entry_filtered module=dedup reason=empty_body seq={} kind={}",
                    entry.sequence_index,
                    entry.kind.as_str()
                );
            }
            continue;
        }

        match entry.kind {
            // Unknown-kind entries compete with highlights: a capture whose
            // metadata failed to parse is still most likely a highlight.
            EntryKind::Highlight | EntryKind::Unknown => {
                if !kept_highlights
                    .iter()
                    .any(|kept| is_duplicate(&entry, kept, config))
                {
                    kept_highlights.push(entry);
                }
            }
            EntryKind::Note => {
                if !kept_notes
                    .iter()
                    .any(|kept| kept.normalized_body == entry.normalized_body)
                {
                    kept_notes.push(entry);
                }
            }
            EntryKind::Bookmark => {
                if !kept_bookmarks
                    .iter()
                    .any(|kept| kept.metadata_raw == entry.metadata_raw)
                {
                    kept_bookmarks.push(entry);
                }
            }
        }
    }

    kept_highlights.sort_by_key(order_key);
    kept_notes.sort_by_key(order_key);
    kept_bookmarks.sort_by_key(order_key);

    let mut ordered = kept_highlights;
    ordered.append(&mut kept_notes);
    ordered.append(&mut kept_bookmarks);
    ordered
}

/// Located entries order by `(start, sequence_index)`; unlocated entries
/// sort after every located one, newest capture first, original position as
/// the final tie-break.
fn order_key(entry: &Entry) -> (u8, u64, i64, usize) {
    match entry.location {
        Some(range) => (0, range.start, 0, entry.sequence_index),
        None => (
            1,
            0,
            -entry.timestamp_epoch.unwrap_or(0),
            entry.sequence_index,
        ),
    }
}
