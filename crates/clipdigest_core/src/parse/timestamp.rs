//! Free-text capture time to epoch seconds.
//!
//! # Responsibility
//! - Convert the capture-time text into epoch seconds, best effort.
//!
//! # Invariants
//! - Conversion never fails hard; unrecognized shapes yield `None`.
//! - The calendar is interpreted in the machine-local zone. The export
//!   records no offset, so cross-zone exports can compare incorrectly; this
//!   is a known ambiguity carried from the export format, not corrected
//!   here.

use chrono::{Local, NaiveDate, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

static CALENDAR_CN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})年\s*(\d{1,2})月\s*(\d{1,2})日.*?(上午|下午)?\s*(\d{1,2}):(\d{2}):(\d{2})")
        .expect("valid calendar regex")
});

static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})[-/](\d{1,2})[-/](\d{1,2})[ T](\d{1,2}):(\d{2}):(\d{2})")
        .expect("valid numeric timestamp regex")
});

/// Parses the capture-time text into epoch seconds.
///
/// Accepted shapes:
/// - `YYYY年M月D日 [weekday] [上午|下午] HH:MM:SS`, with twelve-hour
///   adjustment when a meridiem marker is present;
/// - `YYYY-MM-DD HH:MM:SS` and `YYYY/MM/DD HH:MM:SS` (space or `T`
///   separator).
pub fn parse_epoch(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(captures) = CALENDAR_CN_RE.captures(text) {
        let year: i32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let day: u32 = captures[3].parse().ok()?;
        let meridiem = captures.get(4).map(|m| m.as_str());
        let mut hour: u32 = captures[5].parse().ok()?;
        let minute: u32 = captures[6].parse().ok()?;
        let second: u32 = captures[7].parse().ok()?;

        match meridiem {
            Some("下午") if hour < 12 => hour += 12,
            Some("上午") if hour == 12 => hour = 0,
            _ => {}
        }

        return to_local_epoch(year, month, day, hour, minute, second);
    }

    if let Some(captures) = NUMERIC_RE.captures(text) {
        let year: i32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let day: u32 = captures[3].parse().ok()?;
        let hour: u32 = captures[4].parse().ok()?;
        let minute: u32 = captures[5].parse().ok()?;
        let second: u32 = captures[6].parse().ok()?;
        return to_local_epoch(year, month, day, hour, minute, second);
    }

    None
}

fn to_local_epoch(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<i64> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    // Ambiguous local times (DST fold) resolve to the earliest instant;
    // nonexistent local times yield None.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|datetime| datetime.timestamp())
}
