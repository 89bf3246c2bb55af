//! Local filesystem storage implementation.
//!
//! Every file is written to a temporary sibling first and renamed into
//! place, so a reader never sees a half-written list.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{SiteManifest, SiteSnapshot, SnapshotStorage, WriteSummary};

const SITE_KEY: &str = "site.json";
const ARTICLES_KEY: &str = "articles.json";
const REPOSITORIES_KEY: &str = "repositories.json";
const TALKS_KEY: &str = "talks.json";
const MATERIALS_KEY: &str = "materials.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await?;
        log::debug!("Wrote {}", self.path(key).display());
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Read JSON data that must exist once the manifest does.
    async fn require_json<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.read_json(key).await?.ok_or_else(|| {
            AppError::validation(format!(
                "snapshot in {} is incomplete: {key} missing",
                self.root_dir.display()
            ))
        })
    }
}

#[async_trait]
impl SnapshotStorage for LocalStorage {
    async fn write_snapshot(&self, snapshot: &SiteSnapshot) -> Result<WriteSummary> {
        log::info!("Writing snapshot to {}", self.root_dir.display());

        self.write_json(ARTICLES_KEY, &snapshot.articles).await?;
        self.write_json(REPOSITORIES_KEY, &snapshot.repositories)
            .await?;
        self.write_json(TALKS_KEY, &snapshot.talks).await?;
        self.write_json(MATERIALS_KEY, &snapshot.materials).await?;

        // Manifest last: its presence marks a complete snapshot
        let manifest = SiteManifest::from(snapshot);
        self.write_json(SITE_KEY, &manifest).await?;

        let unavailable_sources = manifest
            .sources
            .iter()
            .filter(|(_, status)| status.unavailable.is_some())
            .map(|(name, _)| name.clone())
            .collect();

        Ok(WriteSummary {
            files_written: 5,
            unavailable_sources,
            timestamp: Utc::now(),
        })
    }

    async fn load_snapshot(&self) -> Result<Option<SiteSnapshot>> {
        let Some(manifest) = self.read_json::<SiteManifest>(SITE_KEY).await? else {
            log::warn!("No snapshot found in {}", self.root_dir.display());
            return Ok(None);
        };

        Ok(Some(SiteSnapshot {
            generated_at: manifest.generated_at,
            site: manifest.site,
            articles: self.require_json(ARTICLES_KEY).await?,
            repositories: self.require_json(REPOSITORIES_KEY).await?,
            talks: self.require_json(TALKS_KEY).await?,
            materials: self.require_json(MATERIALS_KEY).await?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SiteConfig, fallback_articles, fallback_talks};
    use crate::services::{MaterialsOverview, Retrieval};
    use tempfile::TempDir;

    fn snapshot() -> SiteSnapshot {
        SiteSnapshot {
            generated_at: Utc::now(),
            site: SiteConfig::default(),
            articles: Retrieval::fallback(fallback_articles(), "feed down"),
            repositories: Retrieval::ready(Vec::new()),
            talks: Retrieval::ready(fallback_talks()),
            materials: MaterialsOverview {
                collections: Vec::new(),
                total_assets: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!tmp.path().join("test.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let data = storage.read_bytes("nope.txt").await.unwrap();
        assert!(data.is_none());
        assert!(storage.load_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("out"));
        let original = snapshot();

        let summary = storage.write_snapshot(&original).await.unwrap();
        assert_eq!(summary.files_written, 5);
        assert_eq!(summary.unavailable_sources, vec!["articles"]);

        let loaded = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.generated_at, original.generated_at);
        assert_eq!(loaded.articles, original.articles);
        assert_eq!(loaded.talks, original.talks);
        assert_eq!(loaded.site.name, original.site.name);
    }

    #[tokio::test]
    async fn test_manifest_records_availability() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage.write_snapshot(&snapshot()).await.unwrap();

        let manifest: SiteManifest = storage.read_json(SITE_KEY).await.unwrap().unwrap();
        assert_eq!(manifest.sources["articles"].count, 3);
        assert_eq!(
            manifest.sources["articles"].unavailable.as_deref(),
            Some("feed down")
        );
        assert!(manifest.sources["talks"].unavailable.is_none());
    }

    #[tokio::test]
    async fn test_incomplete_snapshot_is_error() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage.write_snapshot(&snapshot()).await.unwrap();
        std::fs::remove_file(tmp.path().join(TALKS_KEY)).unwrap();

        assert!(storage.load_snapshot().await.is_err());
    }
}
