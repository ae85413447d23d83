//! Date helper functions

use chrono::{DateTime, FixedOffset};

/// Parse a publication timestamp as returned by the content repository.
///
/// Accepts RFC 3339 as well as the compact `+0000` offset variant the
/// repository emits.
pub fn parse_publication_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

/// Format a raw publication timestamp for display (e.g. "15 Mar 2021").
///
/// Values that do not parse come back unchanged, so an already-formatted
/// string passes through as-is.
pub fn display_date(raw: &str, format: &str) -> String {
    match parse_publication_date(raw) {
        Some(date) => date.format(format).to_string(),
        None => raw.to_string(),
    }
}
