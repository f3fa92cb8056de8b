//! Comparison canonicalization, clause splitting and content hashing.
//!
//! # Responsibility
//! - Canonicalize whitespace, script-aware spacing and trailing punctuation.
//! - Split normalized text on sentence/clause delimiters.
//! - Derive the fast-path content digest.
//!
//! # Invariants
//! - All functions here are total; no input produces an error.
//! - Clause splitting of a non-empty string never returns an empty list.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static TRAILING_TERMINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[。！？….!?]+$").expect("valid terminal punctuation regex"));
static CLAUSE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[。！？；;.!?\n]+").expect("valid clause split regex"));

/// Ideograph share above which text is treated as a dense-script capture.
const IDEOGRAPH_RATIO_THRESHOLD: f64 = 0.3;

/// Returns whether `text` is mostly CJK unified ideographs.
///
/// Dense scripts carry no inter-word spaces, so any whitespace inside such
/// text is OCR/export noise rather than signal.
pub fn mostly_ideographic(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let mut total = 0usize;
    let mut ideographs = 0usize;
    for ch in text.chars() {
        total += 1;
        if ('\u{4e00}'..='\u{9fff}').contains(&ch) {
            ideographs += 1;
        }
    }
    ideographs as f64 / total.max(1) as f64 >= IDEOGRAPH_RATIO_THRESHOLD
}

/// Canonicalizes passage text for duplicate comparison.
///
/// Steps: unify line endings, trim, collapse whitespace runs, drop all
/// whitespace for dense-script text, strip trailing terminal punctuation.
pub fn normalize_for_compare(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = WHITESPACE_RE.replace_all(unified.trim(), " ");
    let spaced = if mostly_ideographic(&collapsed) {
        WHITESPACE_RE.replace_all(&collapsed, "").into_owned()
    } else {
        collapsed.into_owned()
    };
    TRAILING_TERMINAL_RE.replace(&spaced, "").into_owned()
}

/// Splits normalized text into trimmed clause fragments.
///
/// Falls back to the whole trimmed text as a single clause when no
/// delimiter produces a non-empty fragment.
pub fn split_clauses(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let clauses: Vec<String> = CLAUSE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect();
    if clauses.is_empty() {
        vec![text.trim().to_string()]
    } else {
        clauses
    }
}

/// SHA-256 hex digest of the normalized body.
///
/// Used only as a fast-path equality check; equality of the underlying
/// strings is always confirmed separately.
pub fn content_hash(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}
