//! Repository records from the public repository listing API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::date::{display_date_or_sentinel, epoch_millis, year_or_unknown};

/// Repositories never surfaced: the owner's profile and site repositories.
pub const EXCLUDED_REPOSITORY_NAMES: [&str; 2] = ["iabdul-aal", "iabdul-aal.github.io"];

/// Maximum number of topics kept per repository.
pub const MAX_TOPICS: usize = 6;

/// Language label for repositories without a detected language.
pub const UNSPECIFIED_LANGUAGE: &str = "Unspecified";

/// Repository as returned by the API. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRepository {
    pub name: Option<String>,
    pub html_url: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub topics: Option<Value>,
    pub stargazers_count: Option<Value>,
    pub forks_count: Option<Value>,
    pub updated_at: Option<String>,
    pub private: Option<bool>,
    pub archived: Option<bool>,
    pub fork: Option<bool>,
}

/// A public repository. Identified by `url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub url: String,
    pub description: String,
    pub homepage: String,
    pub language: String,
    pub topics: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    /// Display date, or `Date not listed`
    pub updated_at: String,
    pub updated_at_iso: String,
    pub is_archived: bool,
    pub is_fork: bool,
}

impl Repository {
    /// Validate and coerce a raw API record.
    ///
    /// Returns `None` for records without a name or URL, private records and
    /// denylisted names.
    pub fn normalize(raw: &RawRepository) -> Option<Self> {
        let name = trimmed(&raw.name);
        let url = trimmed(&raw.html_url);

        if name.is_empty() || url.is_empty() || raw.private.unwrap_or(false) {
            return None;
        }
        if is_excluded(&name) {
            return None;
        }

        let updated_at_iso = trimmed(&raw.updated_at);

        Some(Self {
            description: trimmed(&raw.description),
            homepage: trimmed(&raw.homepage),
            language: trimmed(&raw.language),
            topics: topics(raw.topics.as_ref()),
            stars: coerce_count(raw.stargazers_count.as_ref()),
            forks: coerce_count(raw.forks_count.as_ref()),
            updated_at: display_date_or_sentinel(&updated_at_iso),
            updated_at_iso,
            is_archived: raw.archived.unwrap_or(false),
            is_fork: raw.fork.unwrap_or(false),
            name,
            url,
        })
    }

    /// Milliseconds since the epoch of the last update; 0 if unknown.
    pub fn updated_epoch(&self) -> i64 {
        epoch_millis(&self.updated_at_iso)
    }

    /// Year of the last update, or `Unknown`.
    pub fn year(&self) -> String {
        year_or_unknown(&self.updated_at_iso)
    }

    /// Language, or [`UNSPECIFIED_LANGUAGE`].
    pub fn language_label(&self) -> &str {
        if self.language.is_empty() {
            UNSPECIFIED_LANGUAGE
        } else {
            &self.language
        }
    }
}

fn is_excluded(name: &str) -> bool {
    let lower = name.to_lowercase();
    EXCLUDED_REPOSITORY_NAMES.contains(&lower.as_str())
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

fn topics(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|topic| !topic.is_empty())
        .take(MAX_TOPICS)
        .map(str::to_string)
        .collect()
}

/// Non-negative integer from a JSON number or numeric string; 0 otherwise.
fn coerce_count(value: Option<&Value>) -> u64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n > 0.0 => n.floor() as u64,
        _ => 0,
    }
}
