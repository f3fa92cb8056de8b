//! Record block splitting and entry assembly.
//!
//! # Responsibility
//! - Split raw export content into record blocks on the separator line.
//! - Assemble one [`Entry`] from one block, deriving comparison fields.
//!
//! # Invariants
//! - Blocks with fewer than two lines are skipped, never an error.
//! - Every other block yields an entry; missing metadata fields degrade to
//!   `Unknown`/`None`.

use crate::model::entry::Entry;
use crate::normalize::compare::{content_hash, normalize_for_compare, split_clauses};
use crate::parse::metadata::{parse_kind, parse_location, parse_timestamp_raw};
use crate::parse::timestamp::parse_epoch;

/// A record boundary is a line that is exactly this marker.
pub const RECORD_SEPARATOR: &str = "----------";

/// Splits export content into trimmed, non-empty record blocks.
///
/// Only a line consisting of exactly the separator (after trimming) is a
/// boundary; longer hyphen runs inside body text do not split records.
pub fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        if line.trim() == RECORD_SEPARATOR {
            push_block(&mut blocks, &mut current);
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    push_block(&mut blocks, &mut current);

    blocks
}

fn push_block(blocks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        blocks.push(trimmed.to_string());
    }
    current.clear();
}

/// Parses one record block into an entry.
///
/// Layout: title line, metadata line, then zero or more body lines with
/// leading blank lines dropped. Returns `None` only for degenerate blocks
/// of fewer than two lines.
pub fn parse_entry(block: &str, sequence_index: usize) -> Option<Entry> {
    let lines: Vec<&str> = block.lines().collect();
    if lines.len() < 2 {
        return None;
    }

    let document_title = lines[0].trim_start_matches('\u{feff}').trim().to_string();
    let metadata_raw = lines[1].trim().to_string();

    let body_lines: Vec<&str> = lines[2..]
        .iter()
        .copied()
        .skip_while(|line| line.trim().is_empty())
        .collect();
    let body = body_lines.join("\n").trim().to_string();

    let timestamp_raw = parse_timestamp_raw(&metadata_raw);
    let timestamp_epoch = timestamp_raw.as_deref().and_then(parse_epoch);
    let normalized_body = normalize_for_compare(&body);
    let content_hash = content_hash(&normalized_body);
    let clauses = split_clauses(&normalized_body);

    Some(Entry {
        sequence_index,
        document_title,
        kind: parse_kind(&metadata_raw),
        location: parse_location(&metadata_raw),
        metadata_raw,
        timestamp_raw,
        timestamp_epoch,
        body,
        normalized_body,
        content_hash,
        clauses,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_entry, split_blocks};

    #[test]
    fn split_ignores_longer_hyphen_runs_inside_bodies() {
        let content = "Book One\nmeta\nbody with ----------- inside\n----------\nBook Two\nmeta\nbody";
        let blocks = split_blocks(content);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("-----------"));
    }

    #[test]
    fn split_drops_blank_blocks_between_consecutive_separators() {
        let content = "----------\n\n----------\nBook\nmeta\ntext\n----------\n";
        let blocks = split_blocks(content);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn degenerate_block_is_skipped() {
        assert!(parse_entry("only a title", 0).is_none());
        assert!(parse_entry("", 1).is_none());
    }

    #[test]
    fn body_joins_lines_after_dropping_leading_blanks() {
        let entry = parse_entry("Title\nmeta line\n\n\nfirst\nsecond", 3).expect("entry");
        assert_eq!(entry.body, "first\nsecond");
        assert_eq!(entry.sequence_index, 3);
    }

    #[test]
    fn interior_blank_lines_survive_in_body() {
        let entry = parse_entry("Title\nmeta\n\nfirst\n\nsecond", 0).expect("entry");
        assert_eq!(entry.body, "first\n\nsecond");
    }
}
