//! Article data structure.

use serde::{Deserialize, Serialize};

use crate::utils::date::year_or_unknown;

/// Tag used when a feed item carries no category.
pub const FALLBACK_TAG: &str = "Medium Article";

/// Character budget for article excerpts.
pub const EXCERPT_CHARS: usize = 180;

/// An article taken from the author's feed. Identified by `url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,

    /// Plain-text excerpt, at most [`EXCERPT_CHARS`] characters plus an ellipsis
    pub excerpt: String,

    pub url: String,

    /// First category of the item, or [`FALLBACK_TAG`]
    pub tag: String,

    /// Display date (`MMM D, YYYY`), or the raw feed value if it did not parse
    pub published_at: String,
}

impl Article {
    /// Publication year derived from the display date.
    pub fn year(&self) -> String {
        year_or_unknown(&self.published_at)
    }
}

/// Curated articles shown when the feed cannot be read.
pub fn fallback_articles() -> Vec<Article> {
    [
        (
            "Integrated Photonics: Foundations and Applications",
            "Deep dive into the fundamentals of integrated photonics, key technologies, and real-world applications in communications and computing.",
            "https://medium.com/@iabdul-aal/integrated-photonics-foundations-and-applications",
        ),
        (
            "Physics-Informed Neural Networks for Photonic Design",
            "Exploring how machine learning and physics constraints can accelerate the design of optimal photonic devices.",
            "https://medium.com/@iabdul-aal/physics-informed-neural-networks-for-photonic-design",
        ),
        (
            "Quantum Photonics: Building Practical Systems",
            "Technical overview of integrated quantum photonic devices and their role in quantum computing and quantum networks.",
            "https://medium.com/@iabdul-aal/quantum-photonics-building-practical-systems",
        ),
    ]
    .into_iter()
    .map(|(title, excerpt, url)| Article {
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        url: url.to_string(),
        tag: FALLBACK_TAG.to_string(),
        published_at: "2024".to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::UNKNOWN_YEAR;

    #[test]
    fn test_year_from_display_date() {
        let mut article = fallback_articles().remove(0);
        assert_eq!(article.year(), "2024");

        article.published_at = "sometime".to_string();
        assert_eq!(article.year(), UNKNOWN_YEAR);
    }

    #[test]
    fn test_fallback_articles_have_unique_urls() {
        let articles = fallback_articles();
        assert_eq!(articles.len(), 3);
        let urls: std::collections::HashSet<_> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls.len(), 3);
    }
}
