//! Storage abstractions for the site snapshot.
//!
//! A build writes one JSON file per content list plus a manifest, all in a
//! single output directory the static site reads at render time.
//!
//! ## Directory Structure
//!
//! ```text
//! {out}/
//! ├── site.json             # Manifest: generated_at, site metadata, source status
//! ├── articles.json
//! ├── repositories.json
//! ├── talks.json
//! └── materials.json
//! ```

pub mod local;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Article, Repository, SiteConfig, Talk};
use crate::services::{MaterialsOverview, Retrieval};

// Re-export for convenience
pub use local::LocalStorage;

/// Everything the site renders, collected in one build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub generated_at: DateTime<Utc>,
    pub site: SiteConfig,
    pub articles: Retrieval<Article>,
    pub repositories: Retrieval<Repository>,
    pub talks: Retrieval<Talk>,
    pub materials: MaterialsOverview,
}

impl SiteSnapshot {
    /// Per-source item counts and availability, keyed by source name.
    pub fn source_status(&self) -> BTreeMap<String, SourceStatus> {
        let mut status = BTreeMap::new();
        status.insert("articles".to_string(), SourceStatus::of(&self.articles));
        status.insert(
            "repositories".to_string(),
            SourceStatus::of(&self.repositories),
        );
        status.insert("talks".to_string(), SourceStatus::of(&self.talks));
        for entry in &self.materials.collections {
            status.insert(
                format!("materials/{}", entry.collection.slug),
                SourceStatus::of(&entry.assets),
            );
        }
        status
    }
}

/// Count and availability of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<String>,
}

impl SourceStatus {
    fn of<T>(retrieval: &Retrieval<T>) -> Self {
        Self {
            count: retrieval.items.len(),
            unavailable: retrieval.unavailable.clone(),
        }
    }
}

/// Contents of `site.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteManifest {
    pub generated_at: DateTime<Utc>,
    pub site: SiteConfig,
    pub sources: BTreeMap<String, SourceStatus>,
}

impl From<&SiteSnapshot> for SiteManifest {
    fn from(snapshot: &SiteSnapshot) -> Self {
        Self {
            generated_at: snapshot.generated_at,
            site: snapshot.site.clone(),
            sources: snapshot.source_status(),
        }
    }
}

/// Metadata about a snapshot write.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of files written
    pub files_written: usize,
    /// Sources that fell back or came back empty because they were unusable
    pub unavailable_sources: Vec<String>,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Write every file of the snapshot.
    async fn write_snapshot(&self, snapshot: &SiteSnapshot) -> Result<WriteSummary>;

    /// Load a previously written snapshot; `None` if there is none.
    async fn load_snapshot(&self) -> Result<Option<SiteSnapshot>>;
}
