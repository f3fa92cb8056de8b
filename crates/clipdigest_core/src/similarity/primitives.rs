//! Similarity primitives.
//!
//! # Responsibility
//! - Provide the individual match tests the classifier composes: subset,
//!   near-equality ratio, clause overlap, location overlap, timestamp
//!   proximity.
//!
//! # Invariants
//! - All length floors count characters, not bytes.
//! - Every primitive is total and symmetric in its two text arguments.

use crate::model::entry::LocationRange;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Character-level similarity ratio in `[0, 1]`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Returns whether one string literally contains the other, with both at or
/// above `min_chars` characters.
///
/// The floor keeps trivially short fragments from matching everything.
pub fn is_subset(a: &str, b: &str, min_chars: usize) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if char_len(a).min(char_len(b)) < min_chars {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// Returns whether two strings are near-equal at `threshold`.
///
/// Strings shorter than `min_chars` characters are compared only by exact
/// equality; ratios on very short strings are unreliable.
pub fn near_equal(a: &str, b: &str, threshold: f64, min_chars: usize) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if char_len(a).min(char_len(b)) < min_chars {
        return a == b;
    }
    similarity_ratio(a, b) >= threshold
}

/// Returns whether any clause of `a` matches any clause of `b`.
///
/// A match is a literal substring relation in either direction or a ratio
/// at/above `ratio`. Clauses shorter than `min_clause_chars` are skipped on
/// both sides. This catches captures where one side is a prefix/suffix
/// extension of the other, or where quoting/punctuation differs but a core
/// clause is shared.
pub fn clause_overlap(a: &[String], b: &[String], min_clause_chars: usize, ratio: f64) -> bool {
    for clause_a in a {
        if char_len(clause_a) < min_clause_chars {
            continue;
        }
        for clause_b in b {
            if char_len(clause_b) < min_clause_chars {
                continue;
            }
            if clause_a.contains(clause_b.as_str()) || clause_b.contains(clause_a.as_str()) {
                return true;
            }
            if similarity_ratio(clause_a, clause_b) >= ratio {
                return true;
            }
        }
    }
    false
}

/// Returns whether both entries are located and their ranges intersect
/// within `tolerance` units.
pub fn locations_overlap(
    a: Option<LocationRange>,
    b: Option<LocationRange>,
    tolerance: u64,
) -> bool {
    match (a, b) {
        (Some(range_a), Some(range_b)) => range_a.overlaps_within(&range_b, tolerance),
        _ => false,
    }
}

/// Returns whether both entries are dated and captured within
/// `tolerance_secs` of each other.
pub fn timestamps_close(a: Option<i64>, b: Option<i64>, tolerance_secs: i64) -> bool {
    match (a, b) {
        (Some(epoch_a), Some(epoch_b)) => (epoch_a - epoch_b).abs() <= tolerance_secs,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        clause_overlap, is_subset, locations_overlap, near_equal, similarity_ratio,
        timestamps_close,
    };
    use crate::model::entry::LocationRange;

    #[test]
    fn subset_requires_floor_on_both_sides() {
        assert!(is_subset("the quick brown fox", "the quick brown fox jumps", 12));
        assert!(!is_subset("short", "short and much longer", 12));
        assert!(!is_subset("", "anything", 1));
    }

    #[test]
    fn subset_floor_counts_characters_not_bytes() {
        // Ten ideographs are thirty bytes; a floor of twelve chars must
        // still reject them.
        let shorter = "这是一个十个字的句子";
        let longer = "这是一个十个字的句子加长版本";
        assert!(!is_subset(shorter, longer, 12));
        assert!(is_subset(shorter, longer, 10));
    }

    #[test]
    fn near_equal_short_strings_compare_exactly() {
        assert!(near_equal("abcd", "abcd", 0.5, 8));
        assert!(!near_equal("abcd", "abce", 0.5, 8));
    }

    #[test]
    fn near_equal_uses_ratio_at_or_above_floor() {
        // 50 chars, 2 substitutions: ratio 0.96.
        let a = "abcdefghijabcdefghijabcdefghijabcdefghijabcdefghij";
        let b = "abcdefghijabcdefghijabcdefghijabcdefghijabcdefghXY";
        assert!(near_equal(a, b, 0.95, 8));
        assert!(!near_equal(a, b, 0.97, 8));
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = "the quick brown fox";
        let b = "the quick brawn fox";
        assert_eq!(similarity_ratio(a, b), similarity_ratio(b, a));
    }

    #[test]
    fn clause_overlap_skips_short_clauses() {
        let a = vec!["tiny".to_string(), "a clause long enough to count".to_string()];
        let b = vec!["a clause long enough to count and then some".to_string()];
        assert!(clause_overlap(&a, &b, 12, 0.92));
        // With every clause under the floor nothing can match.
        assert!(!clause_overlap(&a, &b, 64, 0.92));
    }

    #[test]
    fn clause_overlap_matches_near_equal_clauses() {
        let a = vec!["the committee approved the proposal unanimously".to_string()];
        let b = vec!["the committee approved the proposal unanimouslz".to_string()];
        assert!(clause_overlap(&a, &b, 12, 0.9));
    }

    #[test]
    fn locations_overlap_requires_both_ranges() {
        let range = Some(LocationRange::new(100, 110));
        assert!(!locations_overlap(range, None, 8));
        assert!(!locations_overlap(None, range, 8));
        assert!(locations_overlap(range, Some(LocationRange::new(102, 115)), 8));
    }

    #[test]
    fn timestamps_close_requires_both_values() {
        assert!(timestamps_close(Some(1000), Some(1200), 300));
        assert!(!timestamps_close(Some(1000), Some(1400), 300));
        assert!(!timestamps_close(Some(1000), None, 300));
    }
}
