// src/utils/date.rs

//! Date parsing and display formatting.
//!
//! Sources hand us dates in several shapes (RFC 2822 feed dates, ISO 8601
//! API timestamps, bare `YYYY-MM-DD` strings). Everything is parsed leniently
//! and rendered as `MMM D, YYYY`.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

/// Sentinel shown when a record carries no usable date.
pub const DATE_NOT_LISTED: &str = "Date not listed";

/// Sentinel year for records whose year cannot be derived.
pub const UNKNOWN_YEAR: &str = "Unknown";

static YEAR_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static LEADING_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}").unwrap());
static FOUR_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const NAIVE_DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Parse a date or timestamp string in any of the supported shapes.
///
/// Naive values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(utc.from_utc_datetime(&naive));
        }
    }

    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    // Year-month and year-only forms resolve to the first day of the period.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        return Some(utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    if FOUR_DIGITS.is_match(value) {
        return year_start(value).map(|dt| dt.fixed_offset());
    }

    None
}

/// Render a timestamp as `MMM D, YYYY` in its own offset.
pub fn format_display_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%b %-d, %Y").to_string()
}

/// Format `value` for display, passing it through unchanged if it does not parse.
pub fn display_date_or_raw(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| format_display_date(&dt))
        .unwrap_or_else(|| value.to_string())
}

/// Format `value` for display, falling back to [`DATE_NOT_LISTED`].
pub fn display_date_or_sentinel(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| format_display_date(&dt))
        .unwrap_or_else(|| DATE_NOT_LISTED.to_string())
}

/// Milliseconds since the Unix epoch, or 0 when `value` does not parse.
pub fn epoch_millis(value: &str) -> i64 {
    parse_timestamp(value).map_or(0, |dt| dt.timestamp_millis())
}

/// January 1st (UTC) of a four-digit year.
pub fn year_start(year: &str) -> Option<DateTime<Utc>> {
    if !FOUR_DIGITS.is_match(year) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}

/// Whether `value` is exactly four ASCII digits.
pub fn is_four_digit_year(value: &str) -> bool {
    FOUR_DIGITS.is_match(value)
}

/// First four-digit run at the very start of `value`.
pub fn leading_year(value: &str) -> Option<&str> {
    LEADING_YEAR.find(value).map(|m| m.as_str())
}

/// First standalone year between 1900 and 2099 found anywhere in `value`.
pub fn year_in_text(value: &str) -> Option<&str> {
    YEAR_IN_TEXT.find(value).map(|m| m.as_str())
}

/// [`year_in_text`] with the [`UNKNOWN_YEAR`] sentinel as default.
pub fn year_or_unknown(value: &str) -> String {
    year_in_text(value).unwrap_or(UNKNOWN_YEAR).to_string()
}
