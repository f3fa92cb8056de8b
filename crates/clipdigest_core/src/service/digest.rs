//! Export-to-digest pipeline.
//!
//! # Responsibility
//! - Turn one decoded export string into the deduplicated digest mapping.
//!
//! # Invariants
//! - Total over any text input; the result may be empty but the call never
//!   fails.
//! - Sequence indices are block positions, so skipped degenerate blocks
//!   still consume an index and indices are never reused.

use crate::dedup::classifier::DedupConfig;
use crate::dedup::grouping::dedup_entries;
use crate::model::entry::Entry;
use crate::parse::block::{parse_entry, split_blocks};
use log::info;
use std::collections::BTreeMap;

/// Builds the deduplicated digest for one raw export.
///
/// Input is the full export content, already decoded leniently by the
/// caller. Output maps each document title to its ordered surviving
/// entries.
pub fn build_digest(content: &str, config: &DedupConfig) -> BTreeMap<String, Vec<Entry>> {
    let blocks = split_blocks(content);
    let entries: Vec<Entry> = blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| parse_entry(block, index))
        .collect();
    info!(
        "event=digest_parse module=service status=ok blocks={} entries={}",
        blocks.len(),
        entries.len()
    );

    let digest = dedup_entries(entries, config);
    let kept: usize = digest.values().map(Vec::len).sum();
    info!(
        "event=digest_complete module=service status=ok documents={} kept={}",
        digest.len(),
        kept
    );
    digest
}
