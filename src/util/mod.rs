//! Small shared helpers: date parsing and display formatting.

pub mod config;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// What: Parse an ISO-like timestamp string into epoch milliseconds.
///
/// Inputs:
/// - `date`: Optional timestamp text as the server sends it
///
/// Output:
/// - Epoch milliseconds; `0` for absent or unparsable input
///
/// Details:
/// - Accepts RFC 3339 (the server's usual form), a naive
///   `YYYY-MM-DDTHH:MM:SS` variant, and a bare `YYYY-MM-DD` date.
/// - Degrading to epoch 0 keeps date sorting total over malformed data:
///   undated listings sink to the oldest end under `newest` ordering.
#[must_use]
pub fn parse_date_ms(date: Option<&str>) -> i64 {
    let Some(raw) = date else {
        return 0;
    };
    let t = raw.trim();
    if t.is_empty() {
        return 0;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.and_utc().timestamp_millis();
    }
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return d
            .and_hms_opt(0, 0, 0)
            .map_or(0, |dt| dt.and_utc().timestamp_millis());
    }
    0
}

/// What: Render a timestamp string as a short display date.
///
/// Inputs:
/// - `date`: Optional timestamp text
///
/// Output:
/// - `YYYY-MM-DD`, or `"-"` when the input does not parse
#[must_use]
pub fn short_date(date: Option<&str>) -> String {
    let ms = parse_date_ms(date);
    if ms == 0 {
        return "-".to_string();
    }
    DateTime::from_timestamp_millis(ms)
        .map_or_else(|| "-".to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

/// What: Format a currency amount the way the listing cards did.
///
/// Inputs:
/// - `value`: Amount in whole currency units
///
/// Output:
/// - `₹` plus the amount without trailing `.0` noise
#[must_use]
pub fn money(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!("₹{}", value as i64)
    } else {
        format!("₹{value:.2}")
    }
}

/// What: Truncate a string to a display-cell budget, unicode-aware.
///
/// Inputs:
/// - `s`: Source text
/// - `max_width`: Maximum display cells
///
/// Output:
/// - The original string, or a prefix ending in `…` that fits the budget
#[must_use]
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Date parsing accepts the server's formats and degrades to zero
    ///
    /// - Input: RFC 3339, naive datetime, bare date, junk, and None
    /// - Output: Monotone epoch values; junk and None both yield 0
    fn parse_date_ms_formats_and_fallback() {
        let rfc = parse_date_ms(Some("2024-06-01T12:00:00.000Z"));
        let naive = parse_date_ms(Some("2024-06-01T12:00:00"));
        let bare = parse_date_ms(Some("2024-06-01"));
        assert!(rfc > 0);
        assert_eq!(rfc, naive);
        assert!(bare > 0 && bare < rfc);
        assert_eq!(parse_date_ms(Some("soon")), 0);
        assert_eq!(parse_date_ms(Some("")), 0);
        assert_eq!(parse_date_ms(None), 0);
    }

    #[test]
    /// What: Money formatting drops fractional noise on whole amounts
    ///
    /// - Input: Whole and fractional values
    /// - Output: "₹500" and "₹499.50"
    fn money_formatting() {
        assert_eq!(money(500.0), "₹500");
        assert_eq!(money(499.5), "₹499.50");
        assert_eq!(money(0.0), "₹0");
    }

    #[test]
    /// What: Truncation respects display width and appends an ellipsis
    ///
    /// - Input: A long ASCII string and a short one
    /// - Output: Short strings untouched; long ones end with `…`
    fn truncate_respects_width() {
        assert_eq!(truncate_to_width("drill", 10), "drill");
        let t = truncate_to_width("a very long listing name", 10);
        assert!(t.ends_with('…'));
        assert!(unicode_width::UnicodeWidthStr::width(t.as_str()) <= 10);
    }

    #[test]
    /// What: Short date renders parsable input and dashes otherwise
    ///
    /// - Input: A valid RFC 3339 stamp and junk
    /// - Output: "2024-06-01" and "-"
    fn short_date_rendering() {
        assert_eq!(short_date(Some("2024-06-01T12:00:00Z")), "2024-06-01");
        assert_eq!(short_date(Some("???")), "-");
        assert_eq!(short_date(None), "-");
    }
}
