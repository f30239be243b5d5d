// Canonical Timestamp Format
//
// All stored timestamps are UTC. Naive inbound values are read as UTC, offset
// values are converted; nothing is ever interpreted in the host's local zone.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

/// Wire format for every timestamp the queue exposes
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Years the four-digit wire format can represent
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Format a stored timestamp for the wire
pub fn format_canonical(ts: DateTime<Utc>) -> String {
    ts.format(CANONICAL_FORMAT).to_string()
}

/// Parse an inbound timestamp
///
/// Accepts RFC 3339 (any offset) and naive `YYYY-MM-DD HH:MM[:SS[.fff]]`
/// read as UTC. Returns `None` for anything else, including instants whose
/// UTC year falls outside 0000-9999.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let parsed = match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(_) => NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc()),
    };
    parsed.filter(|ts| YEAR_RANGE.contains(&ts.year()))
}
