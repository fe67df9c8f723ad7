//! Utility functions for text, numbers and timestamps

use chrono::{DateTime, NaiveDate, Utc};

/// Keep at most `max_chars` characters of `text`, marking the cut with "..."
///
/// Cuts on character boundaries, never inside a multi-byte sequence.
///
/// # Examples
///
/// ```
/// use card_gallery::utils::truncate_chars;
///
/// assert_eq!(truncate_chars("short", 10), "short");
/// assert_eq!(truncate_chars("abcdefgh", 3), "abc...");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Round to 2 decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse an API timestamp
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Render an API date as `YYYY-MM-DD`, falling back to the raw text
pub fn display_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}
