//! Metadata line field extraction.
//!
//! # Responsibility
//! - Extract kind, location range and capture-time text from one metadata
//!   line.
//!
//! Each field has its own ordered list of locale phrasings tried in
//! sequence; the first match wins. New locales are supported by appending
//! matchers, never by widening an existing pattern.

use crate::model::entry::{EntryKind, LocationRange};
use once_cell::sync::Lazy;
use regex::Regex;

static KIND_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)Your\s+(Highlight|Note|Bookmark)").expect("valid kind regex"),
        Regex::new(r"您在.*?的(标注|笔记|书签)").expect("valid kind regex"),
    ]
});

static LOCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"位置\s*#?(\d+)(?:-(\d+))?").expect("valid location regex"),
        Regex::new(r"(?i)Location(?:s)?\s*#?(\d+)(?:-(\d+))?").expect("valid location regex"),
        Regex::new(r"(?i)loc\.\s*(\d+)(?:-(\d+))?").expect("valid location regex"),
    ]
});

static TIMESTAMP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)Added on\s+(.+)").expect("valid timestamp regex"),
        Regex::new(r"添加于\s*(.+)").expect("valid timestamp regex"),
    ]
});

/// Extracts the annotation kind, or `Unknown` when no phrasing matches.
pub fn parse_kind(metadata: &str) -> EntryKind {
    for pattern in KIND_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(metadata) {
            let raw = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            match raw.to_ascii_lowercase().as_str() {
                "highlight" | "标注" => return EntryKind::Highlight,
                "note" | "笔记" => return EntryKind::Note,
                "bookmark" | "书签" => return EntryKind::Bookmark,
                _ => {}
            }
        }
    }
    EntryKind::Unknown
}

/// Extracts the location range, or `None` when no phrasing matches.
///
/// A missing end bound means a single-point range. Inverted pairs are
/// repaired by [`LocationRange::new`]. Numbers too large for the offset
/// type fall through to the next pattern.
pub fn parse_location(metadata: &str) -> Option<LocationRange> {
    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(metadata) {
            let Some(start) = captures.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) else {
                continue;
            };
            let end = match captures.get(2) {
                Some(m) => match m.as_str().parse::<u64>() {
                    Ok(value) => value,
                    Err(_) => continue,
                },
                None => start,
            };
            return Some(LocationRange::new(start, end));
        }
    }
    None
}

/// Extracts the free-text capture time, or `None` when no phrasing matches.
pub fn parse_timestamp_raw(metadata: &str) -> Option<String> {
    for pattern in TIMESTAMP_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(metadata) {
            if let Some(m) = captures.get(1) {
                let trimmed = m.as_str().trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
