//! Utility functions and helpers.

pub mod date;
pub mod http;
pub mod text;

use url::Url;

/// First path segment of a profile URL, e.g. the account name in
/// `https://github.com/<account>`.
pub fn profile_account(profile_url: &str) -> Option<String> {
    Url::parse(profile_url)
        .ok()?
        .path_segments()?
        .find(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

/// Percent-encode a single path segment.
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
