//! Entry domain model.
//!
//! # Responsibility
//! - Define the canonical record produced by the export parser.
//! - Provide range semantics (inversion repair, tolerant overlap).
//!
//! # Invariants
//! - `sequence_index` is stable and never reused within one export.
//! - `location` holds `start <= end` whenever present.
//! - Derived fields (`normalized_body`, `content_hash`, `clauses`) are
//!   functions of `body` and are never edited after construction.

use serde::{Deserialize, Serialize};

/// Annotation category extracted from the metadata line.
///
/// Unknown is a first-class value: a metadata line that matches no kind
/// pattern still yields a usable entry with reduced signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Passage highlighted in the source document.
    Highlight,
    /// User-authored note.
    Note,
    /// Position marker without body text.
    Bookmark,
    /// Metadata line matched no known kind phrasing.
    Unknown,
}

impl EntryKind {
    /// Stable lowercase name used in rendering and log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::Note => "note",
            Self::Bookmark => "bookmark",
            Self::Unknown => "unknown",
        }
    }
}

/// Inclusive start/end offsets locating an annotation in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRange {
    pub start: u64,
    pub end: u64,
}

impl LocationRange {
    /// Builds a range, swapping inverted bounds so `start <= end`.
    pub fn new(start: u64, end: u64) -> Self {
        if start > end {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Returns whether two ranges intersect after expanding each end by
    /// `tolerance` units.
    ///
    /// Captures made a few units apart (off-by-a-word boundary selection)
    /// are treated as overlapping.
    pub fn overlaps_within(&self, other: &LocationRange, tolerance: u64) -> bool {
        !(self.end.saturating_add(tolerance) < other.start
            || other.end.saturating_add(tolerance) < self.start)
    }
}

/// One parsed annotation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Original position in the export; stable tie-breaker.
    pub sequence_index: usize,
    /// Grouping key. Compared by exact string equality, no normalization.
    pub document_title: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Trimmed metadata line verbatim. Identity key for bookmark retention.
    pub metadata_raw: String,
    /// `None` when no location phrasing matched.
    pub location: Option<LocationRange>,
    /// Free-text capture time as exported.
    pub timestamp_raw: Option<String>,
    /// Best-effort epoch seconds derived from `timestamp_raw`.
    pub timestamp_epoch: Option<i64>,
    /// Raw passage text, trimmed. Empty for bookmarks.
    pub body: String,
    /// Comparison-canonical form of `body`.
    pub normalized_body: String,
    /// SHA-256 hex digest of `normalized_body`; fast-path equality only.
    pub content_hash: String,
    /// `normalized_body` split on clause boundaries; non-empty whenever
    /// `normalized_body` is non-empty.
    pub clauses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::LocationRange;

    #[test]
    fn new_swaps_inverted_bounds() {
        let range = LocationRange::new(110, 100);
        assert_eq!(range.start, 100);
        assert_eq!(range.end, 110);
    }

    #[test]
    fn overlap_respects_tolerance() {
        let a = LocationRange::new(100, 110);
        let near = LocationRange::new(115, 120);
        let far = LocationRange::new(130, 140);

        assert!(a.overlaps_within(&near, 8));
        assert!(near.overlaps_within(&a, 8));
        assert!(!a.overlaps_within(&far, 8));
    }

    #[test]
    fn overlap_is_inclusive_of_expanded_bounds() {
        let a = LocationRange::new(100, 110);
        let b = LocationRange::new(118, 125);
        assert!(a.overlaps_within(&b, 8));
        assert!(!a.overlaps_within(&b, 7));
    }
}
