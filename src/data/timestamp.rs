//! Parsing stored check timestamps and formatting them for tooltips.

use chrono::{DateTime, Local, NaiveDateTime};

/// Naive formats written by the checker, tried in order.
///
/// `%.f` also matches when there is no fractional part.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Display format matching a US-English locale string, e.g. "1/1/2024, 12:05:00 AM".
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Parse a stored timestamp into local wall-clock time.
///
/// RFC 3339 timestamps carry an offset and are converted to the local zone;
/// naive timestamps are already local.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS.iter().find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

/// Format a stored timestamp for display, falling back to the raw text.
pub fn format_local(s: &str) -> String {
    match parse_timestamp(s) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => s.to_string(),
    }
}
