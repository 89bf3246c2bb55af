// src/utils/text.rs

//! Text cleanup helpers shared by the feed parser and the normalizers.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]+").unwrap());
static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[^.]+$").unwrap());

/// Entities decoded in feed text, applied in this order.
const ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

/// Marker appended to a truncated excerpt.
pub const ELLIPSIS: &str = "...";

/// Collapse every whitespace run into a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove a `<![CDATA[ ... ]]>` wrapper if present.
pub fn strip_cdata(value: &str) -> String {
    let trimmed = value.trim();
    let inner = trimmed.strip_prefix("<![CDATA[").unwrap_or(trimmed);
    let inner = inner.strip_suffix("]]>").unwrap_or(inner);
    inner.trim().to_string()
}

/// Decode the fixed set of HTML entities feeds commonly carry.
pub fn decode_entities(value: &str) -> String {
    ENTITIES
        .iter()
        .fold(value.to_string(), |acc, (entity, plain)| acc.replace(entity, plain))
}

/// Replace every markup tag with a space and collapse the whitespace left behind.
pub fn strip_html(value: &str) -> String {
    collapse_whitespace(&MARKUP_TAG.replace_all(value, " "))
}

/// Build a plain-text excerpt of at most `max_chars` characters plus [`ELLIPSIS`].
///
/// Text that already fits is returned as-is (after markup stripping); longer text
/// is cut at `max_chars`, trailing whitespace is trimmed and the marker appended.
pub fn excerpt(raw: &str, max_chars: usize) -> String {
    let plain = strip_html(raw);
    if plain.chars().count() <= max_chars {
        return plain;
    }

    let cut: String = plain.chars().take(max_chars).collect();
    format!("{}{}", cut.trim_end(), ELLIPSIS)
}

/// Derive a human-friendly name from a file name.
///
/// `intro-to_photonics.pdf` becomes `intro to photonics`. Returns an empty
/// string when nothing is left after stripping.
pub fn display_name_from_file(file_name: &str) -> String {
    let stem = FILE_EXTENSION.replace(file_name, "");
    collapse_whitespace(&SEPARATOR_RUN.replace_all(&stem, " "))
}

/// Case-insensitive ordering used for names and option labels.
///
/// Strings equal apart from case put the lowercase form first, which keeps
/// the order total and stable across runs.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_cdata() {
        assert_eq!(strip_cdata("<![CDATA[Hello & World]]>"), "Hello & World");
        assert_eq!(strip_cdata("  plain  "), "plain");
        assert_eq!(strip_cdata("<![CDATA[  padded ]]>"), "padded");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("Tom &amp; Jerry &lt;3 &quot;hi&quot; it&#39;s&nbsp;ok &gt;"),
            "Tom & Jerry <3 \"hi\" it's ok >"
        );
    }

    #[test]
    fn test_strip_html_collapses_whitespace() {
        assert_eq!(strip_html("<p>Short</p>"), "Short");
        assert_eq!(
            strip_html("<p>One</p>\n\n<p>Two <b>three</b></p>"),
            "One Two three"
        );
    }

    #[test]
    fn test_excerpt_within_budget_is_exact() {
        let text = "a".repeat(180);
        assert_eq!(excerpt(&text, 180), text);
    }

    #[test]
    fn test_excerpt_truncates_with_marker() {
        let text = format!("{} tail", "word ".repeat(50));
        let result = excerpt(&text, 180);
        assert!(result.ends_with(ELLIPSIS));
        assert!(result.chars().count() <= 184);

        let body = result.strip_suffix(ELLIPSIS).unwrap();
        assert!(!body.ends_with(' '));
        assert!(strip_html(&text).starts_with(body));
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let text = "é".repeat(180);
        assert_eq!(excerpt(&text, 180), text);
    }

    #[test]
    fn test_display_name_from_file() {
        assert_eq!(
            display_name_from_file("intro--to__photonics.pdf"),
            "intro to photonics"
        );
        assert_eq!(display_name_from_file("notes.v2.md"), "notes.v2");
        assert_eq!(display_name_from_file("---.pdf"), "");
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("alpha", "Beta"), Ordering::Less);
        assert_eq!(locale_cmp("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }
}
