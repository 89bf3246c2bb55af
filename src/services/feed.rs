// src/services/feed.rs

//! Article feed reader.
//!
//! The feed is treated as loosely structured text rather than XML: each
//! `<item>…</item>` fragment is scanned for the first `title`, `link`,
//! `pubDate` and `description` tags plus every `category`. Missing or
//! malformed tags become empty strings, so parsing cannot fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Article, Config, EXCERPT_CHARS, FALLBACK_TAG};
use crate::pipeline::assemble::assemble_articles;
use crate::services::Retrieval;
use crate::utils::date::display_date_or_raw;
use crate::utils::http::{Fetch, SourceRequest};
use crate::utils::text::{decode_entities, excerpt, strip_cdata};

static ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<item\b.*?</item>").unwrap());
static TITLE: LazyLock<Regex> = LazyLock::new(|| tag_pattern("title"));
static LINK: LazyLock<Regex> = LazyLock::new(|| tag_pattern("link"));
static PUB_DATE: LazyLock<Regex> = LazyLock::new(|| tag_pattern("pubDate"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| tag_pattern("description"));
static CATEGORY: LazyLock<Regex> = LazyLock::new(|| tag_pattern("category"));

fn tag_pattern(tag: &str) -> Regex {
    Regex::new(&format!(r"(?is)<{tag}>(.*?)</{tag}>")).unwrap()
}

/// Parse feed text into articles in document order, capped at `limit`
/// (zero or less means all of them).
pub fn parse_feed(xml: &str, limit: i64) -> Vec<Article> {
    let articles = ITEM
        .find_iter(xml)
        .map(|item| parse_item(item.as_str()))
        .collect();
    assemble_articles(articles, limit)
}

fn parse_item(item: &str) -> Article {
    let categories = extract_categories(item);

    Article {
        title: extract_tag(item, &TITLE),
        url: extract_tag(item, &LINK),
        published_at: display_date_or_raw(&extract_tag(item, &PUB_DATE)),
        excerpt: excerpt(&extract_tag(item, &DESCRIPTION), EXCERPT_CHARS),
        tag: categories
            .into_iter()
            .next()
            .unwrap_or_else(|| FALLBACK_TAG.to_string()),
    }
}

/// Content of the first match of `pattern`, unwrapped and decoded.
fn extract_tag(item: &str, pattern: &Regex) -> String {
    pattern
        .captures(item)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_entities(&strip_cdata(m.as_str())))
        .unwrap_or_default()
}

/// Every non-empty category, in document order.
fn extract_categories(item: &str) -> Vec<String> {
    CATEGORY
        .captures_iter(item)
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_entities(&strip_cdata(m.as_str())))
        .filter(|category| !category.is_empty())
        .collect()
}

/// Fetch and parse the configured feed.
///
/// Any failure yields an empty, unavailable retrieval; callers decide on a
/// fallback list.
pub async fn fetch_articles(fetcher: &dyn Fetch, config: &Config) -> Retrieval<Article> {
    let url = &config.site.social.medium_rss;
    log::info!("Fetching article feed from {url}");

    let result = fetcher
        .get_text(&SourceRequest::get(url))
        .await
        .map(|xml| parse_feed(&xml, config.limits.articles));

    let retrieval = Retrieval::from_result("Article feed", result);
    log::info!("Article feed: {} articles", retrieval.items.len());
    retrieval
}
