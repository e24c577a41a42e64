//! Year normalization for release dates.
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Keep the first four characters of a date-like string.
///
/// `"2025-06-27T00:00:00Z"` becomes `"2025"`; an empty string stays empty.
pub fn truncate_year(value: &str) -> String {
    value.trim().chars().take(4).collect()
}

/// Four-digit year of a structured date.
pub fn year_of<D: Datelike>(date: &D) -> String {
    format!("{:04}", date.year())
}

/// Parse an ISO-8601 release timestamp and return its four-digit year.
///
/// Accepts RFC 3339 timestamps (including a trailing `Z`), naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps, and plain `YYYY-MM-DD` dates.
pub fn year_from_release_date(value: &str) -> Option<String> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(year_of(&parsed.date_naive()));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(year_of(&parsed.date()));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(year_of(&parsed));
    }
    None
}
