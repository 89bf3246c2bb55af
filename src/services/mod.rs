//! Content sources.
//!
//! Each source turns one external input into a canonical, assembled list:
//! - Article feed (`feed`)
//! - Repository listing API (`github`)
//! - Local talks file (`talks`)
//! - Local material collections (`materials`)
//!
//! Sources never fail. Whatever goes wrong is logged and reported through
//! [`Retrieval::unavailable`], with an empty or fallback list in `items`.

pub mod feed;
pub mod github;
pub mod materials;
pub mod talks;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use feed::{fetch_articles, parse_feed};
pub use github::{fetch_repositories, parse_repositories, repositories_request};
pub use materials::{CollectionAssets, MaterialsOverview, collection_assets, materials_overview};
pub use talks::{load_talks, parse_talks};

/// Outcome of reading one source: the list plus, if the source could not be
/// used, the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrieval<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<String>,
}

impl<T> Retrieval<T> {
    pub fn ready(items: Vec<T>) -> Self {
        Self {
            items,
            unavailable: None,
        }
    }

    /// Source unusable; the list is empty.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::fallback(Vec::new(), reason)
    }

    /// Source unusable; `items` stand in for it.
    pub fn fallback(items: Vec<T>, reason: impl Into<String>) -> Self {
        Self {
            items,
            unavailable: Some(reason.into()),
        }
    }

    /// Convert a fallible read, logging the failure.
    pub fn from_result(context: &str, result: Result<Vec<T>>) -> Self {
        match result {
            Ok(items) => Self::ready(items),
            Err(error) => {
                log::warn!("{context} unavailable: {error}");
                Self::unavailable(error.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }

    /// Replace an empty list with `fallback()`; a non-empty list is kept.
    pub fn or_fallback(self, fallback: impl FnOnce() -> Vec<T>) -> Self {
        if !self.items.is_empty() {
            return self;
        }
        let reason = self
            .unavailable
            .unwrap_or_else(|| "source returned no items".to_string());
        Self::fallback(fallback(), reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_from_result_degrades_to_empty() {
        let retrieval: Retrieval<u8> =
            Retrieval::from_result("feed", Err(AppError::unavailable("feed", "timeout")));
        assert!(!retrieval.is_available());
        assert!(retrieval.items.is_empty());
        assert!(retrieval.unavailable.unwrap().contains("timeout"));
    }

    #[test]
    fn test_or_fallback_only_when_empty() {
        let kept = Retrieval::ready(vec![1]).or_fallback(|| vec![9]);
        assert_eq!(kept.items, vec![1]);
        assert!(kept.is_available());

        let replaced = Retrieval::<u8>::unavailable("down").or_fallback(|| vec![9]);
        assert_eq!(replaced.items, vec![9]);
        assert_eq!(replaced.unavailable.as_deref(), Some("down"));

        let empty = Retrieval::<u8>::ready(Vec::new()).or_fallback(|| vec![9]);
        assert_eq!(empty.items, vec![9]);
        assert!(!empty.is_available());
    }
}
