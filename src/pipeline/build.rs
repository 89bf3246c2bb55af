// src/pipeline/build.rs

//! Snapshot build: read every source and hand the result to storage.

use std::path::Path;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, fallback_articles};
use crate::services::{fetch_articles, fetch_repositories, load_talks, materials_overview};
use crate::storage::{SiteSnapshot, SnapshotStorage, WriteSummary};
use crate::utils::http::Fetch;

/// Collect every content list.
///
/// The feed and the repository listing are awaited together. Local paths in
/// `config` are resolved against `base`. An unusable feed is replaced by the
/// curated article list; the other sources keep whatever they returned.
pub async fn collect_snapshot(config: &Config, fetcher: &dyn Fetch, base: &Path) -> SiteSnapshot {
    let (articles, repositories) = tokio::join!(
        fetch_articles(fetcher, config),
        fetch_repositories(fetcher, config)
    );

    let talks = load_talks(&config.talks_path(base)).await;
    let materials = materials_overview(&config.materials_root(base)).await;

    SiteSnapshot {
        generated_at: Utc::now(),
        site: config.site.clone(),
        articles: articles.or_fallback(fallback_articles),
        repositories,
        talks,
        materials,
    }
}

/// Collect a snapshot and write it.
pub async fn run_build(
    config: &Config,
    fetcher: &dyn Fetch,
    storage: &dyn SnapshotStorage,
    base: &Path,
) -> Result<WriteSummary> {
    log::info!("Building site snapshot");

    let snapshot = collect_snapshot(config, fetcher, base).await;
    let summary = storage.write_snapshot(&snapshot).await?;

    log::info!(
        "Snapshot: {} articles, {} repositories, {} talks, {} material files",
        snapshot.articles.items.len(),
        snapshot.repositories.items.len(),
        snapshot.talks.items.len(),
        snapshot.materials.total_assets
    );
    if !summary.unavailable_sources.is_empty() {
        log::warn!(
            "Sources unavailable: {}",
            summary.unavailable_sources.join(", ")
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use crate::utils::http::testing::StubFetcher;
    use tempfile::TempDir;

    const FEED: &str = "<rss><channel>\
        <item><title>Ring resonators</title><link>https://m/1</link><pubDate>2024-03-01</pubDate></item>\
        </channel></rss>";
    const REPOS: &str = r#"[{"name": "fdtd", "html_url": "https://github.com/u/fdtd"}]"#;
    const REPOS_URL: &str =
        "https://api.github.com/users/iabdul-aal/repos?per_page=100&sort=updated&type=public";

    #[tokio::test]
    async fn test_collect_with_sources_up() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        std::fs::write(
            tmp.path().join("talks.json"),
            r#"[{"title": "Waveguides", "url": "https://t/1", "year": "2024"}]"#,
        )
        .unwrap();
        let fetcher = StubFetcher::default()
            .with(&config.site.social.medium_rss, FEED)
            .with(REPOS_URL, REPOS);

        let snapshot = collect_snapshot(&config, &fetcher, tmp.path()).await;
        assert!(snapshot.articles.is_available());
        assert_eq!(snapshot.articles.items[0].title, "Ring resonators");
        assert_eq!(snapshot.repositories.items[0].name, "fdtd");
        assert_eq!(snapshot.talks.items[0].title, "Waveguides");
        assert_eq!(snapshot.materials.total_assets, 0);
        assert_eq!(fetcher.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_collect_with_sources_down() {
        let tmp = TempDir::new().unwrap();
        let snapshot = collect_snapshot(&Config::default(), &StubFetcher::default(), tmp.path()).await;

        assert_eq!(snapshot.articles.items, fallback_articles());
        assert!(!snapshot.articles.is_available());
        assert!(snapshot.repositories.items.is_empty());
        assert!(!snapshot.repositories.is_available());
        assert!(!snapshot.talks.is_available());
        assert_eq!(snapshot.talks.items.len(), 1);
    }

    #[tokio::test]
    async fn test_run_build_writes_snapshot() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let storage = LocalStorage::new(&out);
        let config = Config::default();
        let fetcher = StubFetcher::default().with(REPOS_URL, REPOS);

        let summary = run_build(&config, &fetcher, &storage, tmp.path()).await.unwrap();
        assert_eq!(summary.unavailable_sources, vec!["articles", "talks"]);

        for file in ["site.json", "articles.json", "repositories.json", "talks.json", "materials.json"] {
            assert!(out.join(file).exists(), "{file} missing");
        }

        let loaded = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.repositories.items.len(), 1);
    }
}
