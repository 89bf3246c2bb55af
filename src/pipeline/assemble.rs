// src/pipeline/assemble.rs

//! List assembly: deduplicate by natural key, sort, truncate.
//!
//! Every list handed to the site goes through [`assemble`]. The first
//! occurrence of a key wins and survivors keep their relative order before
//! sorting. Sorting is stable and every comparator ends in a deterministic
//! tie-break, so equal inputs always produce equal outputs.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use crate::models::{Article, MaterialAsset, Repository, Talk};
use crate::utils::text::locale_cmp;

/// Drop every item whose key was already seen, keeping the first occurrence.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Keep the first `limit` items. A limit of zero or less keeps everything.
pub fn apply_limit<T>(mut items: Vec<T>, limit: i64) -> Vec<T> {
    if limit > 0 {
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    items
}

/// Deduplicate, optionally sort, then truncate.
pub fn assemble<T, K, F>(
    items: Vec<T>,
    key: F,
    compare: Option<fn(&T, &T) -> Ordering>,
    limit: i64,
) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut items = dedup_by_key(items, key);
    if let Some(compare) = compare {
        items.sort_by(compare);
    }
    apply_limit(items, limit)
}

/// Articles keep feed order; only duplicates by URL are removed.
pub fn assemble_articles(articles: Vec<Article>, limit: i64) -> Vec<Article> {
    assemble(articles, |a| a.url.clone(), None, limit)
}

/// Repositories: most recently updated first, then by name.
pub fn assemble_repositories(repositories: Vec<Repository>, limit: i64) -> Vec<Repository> {
    assemble(
        repositories,
        |r| r.url.clone(),
        Some(compare_repositories),
        limit,
    )
}

/// Talks: newest date score first, featured before non-featured, then by title.
pub fn assemble_talks(talks: Vec<Talk>, limit: i64) -> Vec<Talk> {
    assemble(talks, |t| t.url.clone(), Some(compare_talks), limit)
}

/// Material files: most recently modified first, then by display name.
pub fn assemble_assets(assets: Vec<MaterialAsset>) -> Vec<MaterialAsset> {
    assemble(assets, |a| a.file_name.clone(), Some(compare_assets), 0)
}

pub fn compare_repositories(a: &Repository, b: &Repository) -> Ordering {
    b.updated_epoch()
        .cmp(&a.updated_epoch())
        .then_with(|| locale_cmp(&a.name, &b.name))
        .then_with(|| a.url.cmp(&b.url))
}

pub fn compare_talks(a: &Talk, b: &Talk) -> Ordering {
    b.date_score()
        .cmp(&a.date_score())
        .then_with(|| b.featured.cmp(&a.featured))
        .then_with(|| locale_cmp(&a.title, &b.title))
        .then_with(|| a.url.cmp(&b.url))
}

pub fn compare_assets(a: &MaterialAsset, b: &MaterialAsset) -> Ordering {
    b.updated_at_epoch
        .cmp(&a.updated_at_epoch)
        .then_with(|| locale_cmp(&a.display_name, &b.display_name))
        .then_with(|| a.file_name.cmp(&b.file_name))
}
