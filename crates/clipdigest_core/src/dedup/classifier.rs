//! Duplicate classifier.
//!
//! # Responsibility
//! - Decide whether a candidate entry duplicates an already-kept entry.
//! - Expose every policy threshold as named configuration.
//!
//! # Invariants
//! - The decision is semantically commutative in its two entries.
//! - Location overlap and timestamp proximity only relax textual
//!   thresholds, never tighten them.
//! - Trace mode changes log output only, never the verdict.

use crate::model::entry::Entry;
use crate::similarity::primitives::{
    clause_overlap, is_subset, locations_overlap, near_equal, timestamps_close,
};
use log::debug;

/// Textual-similarity policy constants.
///
/// These are tuned values, not derived ones; they live here as plain fields
/// so tests and callers can tighten or relax the policy without touching
/// the decision procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierThresholds {
    /// Units added to each range end before the intersection test.
    pub location_tolerance: u64,
    /// Below this character count, near-equality degrades to exact match.
    pub near_equal_min_chars: usize,
    /// Clause ratio when timestamps corroborate.
    pub clause_ratio_time_close: f64,
    /// Clause ratio without temporal corroboration.
    pub clause_ratio_default: f64,
    /// Whole-body ratio under location overlap, regardless of timestamps.
    pub overlap_near_ratio: f64,
    /// Subset floor under location overlap.
    pub overlap_subset_floor: usize,
    /// Whole-body ratio without overlap, timestamps close.
    pub near_ratio_time_close: f64,
    /// Whole-body ratio without overlap and without temporal corroboration.
    pub near_ratio_strict: f64,
    /// Subset floor without overlap, timestamps close.
    pub subset_floor_time_close: usize,
    /// Subset floor without overlap and without temporal corroboration.
    pub subset_floor_strict: usize,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            location_tolerance: 8,
            near_equal_min_chars: 8,
            clause_ratio_time_close: 0.88,
            clause_ratio_default: 0.92,
            overlap_near_ratio: 0.90,
            overlap_subset_floor: 12,
            near_ratio_time_close: 0.92,
            near_ratio_strict: 0.95,
            subset_floor_time_close: 10,
            subset_floor_strict: 16,
        }
    }
}

/// Tunables accepted by the digest entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupConfig {
    /// Maximum capture-time distance treated as corroborating, in seconds.
    pub time_tolerance_secs: i64,
    /// Minimum clause length considered by clause-overlap matching.
    pub min_clause_len: usize,
    /// Emit decision-path log events. Never alters results.
    pub trace: bool,
    pub thresholds: ClassifierThresholds,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            time_tolerance_secs: 300,
            min_clause_len: 12,
            trace: false,
            thresholds: ClassifierThresholds::default(),
        }
    }
}

/// Which rule declared two entries duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateReason {
    /// Normalized bodies are identical.
    ExactNormalized,
    /// Ranges overlap and a clause matched.
    OverlapClause,
    /// Ranges overlap and one body contains the other.
    OverlapSubset,
    /// Ranges overlap and bodies are near-equal.
    OverlapNear,
    /// No overlap; a clause matched.
    ClauseMatch,
    /// No overlap; one body contains the other.
    Subset,
    /// No overlap; bodies are near-equal.
    Near,
}

impl DuplicateReason {
    /// Stable name used in trace log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactNormalized => "exact_normalized",
            Self::OverlapClause => "overlap_clause",
            Self::OverlapSubset => "overlap_subset",
            Self::OverlapNear => "overlap_near",
            Self::ClauseMatch => "clause_match",
            Self::Subset => "subset",
            Self::Near => "near",
        }
    }
}

/// Classifies a candidate against one kept entry.
///
/// Returns the rule that fired, or `None` when the pair is not a duplicate.
/// Graduated policy: corroborating structural signals (location overlap,
/// timestamp proximity) lower the textual bar; absence of both demands
/// near-identical text.
pub fn classify(candidate: &Entry, kept: &Entry, config: &DedupConfig) -> Option<DuplicateReason> {
    let a = candidate.normalized_body.as_str();
    let b = kept.normalized_body.as_str();
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if candidate.content_hash == kept.content_hash && a == b {
        return Some(DuplicateReason::ExactNormalized);
    }

    let thresholds = &config.thresholds;
    let overlap = locations_overlap(
        candidate.location,
        kept.location,
        thresholds.location_tolerance,
    );
    let time_close = timestamps_close(
        candidate.timestamp_epoch,
        kept.timestamp_epoch,
        config.time_tolerance_secs,
    );
    // Temporal proximity is corroborating evidence; it loosens the clause
    // bar even before the overlap branch is chosen.
    let clause_ratio = if time_close {
        thresholds.clause_ratio_time_close
    } else {
        thresholds.clause_ratio_default
    };
    let clause_match = clause_overlap(
        &candidate.clauses,
        &kept.clauses,
        config.min_clause_len,
        clause_ratio,
    );

    if overlap {
        if clause_match {
            return Some(DuplicateReason::OverlapClause);
        }
        if is_subset(a, b, thresholds.overlap_subset_floor) {
            return Some(DuplicateReason::OverlapSubset);
        }
        if near_equal(
            a,
            b,
            thresholds.overlap_near_ratio,
            thresholds.near_equal_min_chars,
        ) {
            return Some(DuplicateReason::OverlapNear);
        }
        return None;
    }

    if clause_match {
        return Some(DuplicateReason::ClauseMatch);
    }
    let subset_floor = if time_close {
        thresholds.subset_floor_time_close
    } else {
        thresholds.subset_floor_strict
    };
    if is_subset(a, b, subset_floor) {
        return Some(DuplicateReason::Subset);
    }
    let near_ratio = if time_close {
        thresholds.near_ratio_time_close
    } else {
        thresholds.near_ratio_strict
    };
    if near_equal(a, b, near_ratio, thresholds.near_equal_min_chars) {
        return Some(DuplicateReason::Near);
    }
    None
}

/// Returns whether the candidate duplicates the kept entry, emitting a
/// decision-path event when trace mode is on.
pub fn is_duplicate(candidate: &Entry, kept: &Entry, config: &DedupConfig) -> bool {
    let verdict = classify(candidate, kept, config);
    if config.trace {
        match verdict {
            Some(reason) => debug!(
                "event=dedup_decision module=dedup status=duplicate reason={} candidate_seq={} kept_seq={}",
                reason.as_str(),
                candidate.sequence_index,
                kept.sequence_index
            ),
            None => debug!(
                "event=dedup_decision module=dedup status=distinct candidate_seq={} kept_seq={}",
                candidate.sequence_index, kept.sequence_index
            ),
        }
    }
    verdict.is_some()
}
