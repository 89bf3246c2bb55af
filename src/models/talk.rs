//! Talk records read from the local talks file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::date::{
    DATE_NOT_LISTED, UNKNOWN_YEAR, format_display_date, is_four_digit_year, leading_year,
    parse_timestamp, year_in_text, year_start,
};

pub const DEFAULT_EVENT: &str = "Talk";
pub const DEFAULT_SOURCE: &str = "Public source";
pub const DEFAULT_FORMAT: &str = "Technical Talk";

/// Talk record as stored on disk. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTalk {
    pub title: Option<String>,
    pub event: Option<String>,
    pub date: Option<String>,
    /// Usually a string, tolerated as a number
    pub year: Option<Value>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub format: Option<String>,
    pub featured: Option<Value>,
}

/// A public talk. Identified by `url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Talk {
    pub title: String,
    pub event: String,
    /// Raw date string as supplied (may be empty)
    pub date: String,
    /// Explicit year, or the leading four digits of `date`; may be empty
    pub year: String,
    pub url: String,
    pub source: String,
    pub format: String,
    pub featured: bool,
}

impl Talk {
    /// Validate and default a raw record. Records without a title or URL are dropped.
    pub fn normalize(raw: &RawTalk) -> Option<Self> {
        let title = trimmed(&raw.title);
        let url = trimmed(&raw.url);
        if title.is_empty() || url.is_empty() {
            return None;
        }

        let date = trimmed(&raw.date);
        let explicit_year = match &raw.year {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let year = if explicit_year.is_empty() {
            leading_year(&date).unwrap_or("").to_string()
        } else {
            explicit_year
        };

        Some(Self {
            title,
            event: or_default(&raw.event, DEFAULT_EVENT),
            date,
            year,
            url,
            source: or_default(&raw.source, DEFAULT_SOURCE),
            format: or_default(&raw.format, DEFAULT_FORMAT),
            featured: truthy(raw.featured.as_ref()),
        })
    }

    /// Sort score in epoch milliseconds.
    ///
    /// Uses the date when it parses, else January 1st of a four-digit year, else 0.
    pub fn date_score(&self) -> i64 {
        if let Some(dt) = parse_timestamp(&self.date) {
            return dt.timestamp_millis();
        }
        year_start(&self.year).map_or(0, |dt| dt.timestamp_millis())
    }

    /// Date shown on the talk card.
    pub fn display_date(&self) -> String {
        if let Some(dt) = parse_timestamp(&self.date) {
            return format_display_date(&dt);
        }
        if self.year.is_empty() {
            DATE_NOT_LISTED.to_string()
        } else {
            self.year.clone()
        }
    }

    /// Year used by the year filter: a four-digit explicit year, a year found
    /// in the date, or `Unknown`.
    pub fn filter_year(&self) -> String {
        if self.has_known_year() {
            return self.year.clone();
        }
        year_in_text(&self.date)
            .unwrap_or(UNKNOWN_YEAR)
            .to_string()
    }

    /// Whether `year` is a well-formed four-digit year.
    pub fn has_known_year(&self) -> bool {
        is_four_digit_year(&self.year)
    }
}

/// Talk list used when the talks file is missing, malformed or empty.
pub fn fallback_talks() -> Vec<Talk> {
    vec![Talk {
        title: "Recent Public Talk".to_string(),
        event: "Featured Public Session".to_string(),
        date: String::new(),
        year: "2025".to_string(),
        url: "https://www.youtube.com/watch?v=mEboydO5pEk&t=4s".to_string(),
        source: "YouTube".to_string(),
        format: DEFAULT_FORMAT.to_string(),
        featured: true,
    }]
}

/// The talk to spotlight: first featured one, else the first one.
pub fn spotlight<'a>(talks: &[&'a Talk]) -> Option<&'a Talk> {
    talks
        .iter()
        .find(|talk| talk.featured)
        .or_else(|| talks.first())
        .copied()
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

fn or_default(value: &Option<String>, default: &str) -> String {
    let value = trimmed(value);
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
