// src/services/materials.rs

//! Material collections on the local filesystem.
//!
//! Each collection is a folder named after its slug under the materials
//! root. A folder that does not exist is an empty collection.

use std::io::ErrorKind;
use std::path::Path;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{CollectionSlug, FileEntry, MaterialAsset, MaterialCollection};
use crate::pipeline::assemble::assemble_assets;
use crate::services::Retrieval;

/// A collection together with its published files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionAssets {
    pub collection: MaterialCollection,
    pub assets: Retrieval<MaterialAsset>,
}

/// Every collection with its files, plus the total file count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsOverview {
    pub collections: Vec<CollectionAssets>,
    pub total_assets: usize,
}

impl MaterialsOverview {
    /// Entry for one collection, if present.
    pub fn get(&self, slug: CollectionSlug) -> Option<&CollectionAssets> {
        self.collections.iter().find(|c| c.collection.slug == slug)
    }
}

/// List the entries of `dir` with their size and modification time.
///
/// Entries that cannot be stat'ed or whose names are not UTF-8 are skipped.
async fn read_entries(dir: &Path) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    let mut listing = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = listing.next_entry().await? {
        let Ok(file_name) = entry.file_name().into_string() else {
            log::debug!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };

        match stat_entry(&entry, file_name).await {
            Ok(file_entry) => entries.push(file_entry),
            Err(e) => log::warn!("Cannot stat {}: {e}", entry.path().display()),
        }
    }

    Ok(entries)
}

async fn stat_entry(entry: &tokio::fs::DirEntry, file_name: String) -> std::io::Result<FileEntry> {
    let is_file = entry.file_type().await?.is_file();
    let metadata = tokio::fs::metadata(entry.path()).await?;

    Ok(FileEntry {
        file_name,
        is_file,
        size: metadata.len(),
        modified: metadata.modified()?,
    })
}

/// Published files of one collection, newest first.
pub async fn collection_assets(root: &Path, slug: CollectionSlug) -> Retrieval<MaterialAsset> {
    let dir = root.join(slug.as_str());

    let entries = match read_entries(&dir).await {
        Ok(entries) => entries,
        Err(AppError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No folder for collection '{slug}' at {}", dir.display());
            return Retrieval::ready(Vec::new());
        }
        Err(e) => return Retrieval::from_result(&format!("Collection '{slug}'"), Err(e)),
    };

    let assets = entries
        .iter()
        .filter_map(|entry| MaterialAsset::from_entry(slug, entry))
        .collect();
    let assets = assemble_assets(assets);

    log::debug!("Collection '{slug}': {} files", assets.len());
    Retrieval::ready(assets)
}

/// Read every collection concurrently.
pub async fn materials_overview(root: &Path) -> MaterialsOverview {
    let collections = MaterialCollection::all();
    let listings = join_all(
        collections
            .iter()
            .map(|collection| collection_assets(root, collection.slug)),
    )
    .await;

    let collections: Vec<CollectionAssets> = collections
        .into_iter()
        .zip(listings)
        .map(|(collection, assets)| CollectionAssets { collection, assets })
        .collect();
    let total_assets = collections.iter().map(|c| c.assets.items.len()).sum();

    log::info!(
        "Materials: {} files across {} collections",
        total_assets,
        collections.len()
    );
    MaterialsOverview {
        collections,
        total_assets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, bytes: usize, secs: u64) {
        let path = dir.join(name);
        std::fs::write(&path, vec![b'x'; bytes]).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    fn slides_dir(tmp: &TempDir) -> std::path::PathBuf {
        let dir = tmp.path().join("slides");
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_missing_folder_is_empty() {
        let tmp = TempDir::new().unwrap();
        let retrieval = collection_assets(tmp.path(), CollectionSlug::Roadmaps).await;

        assert!(retrieval.is_available());
        assert!(retrieval.items.is_empty());
    }

    #[tokio::test]
    async fn test_filters_and_sorts_files() {
        let tmp = TempDir::new().unwrap();
        let dir = slides_dir(&tmp);

        write_file(&dir, "old-deck.pdf", 10, 1_600_000_000);
        write_file(&dir, "b_intro.pptx", 4096, 1_700_000_000);
        write_file(&dir, "a_intro.pptx", 20, 1_700_000_000);
        write_file(&dir, "virus.exe", 10, 1_800_000_000);
        write_file(&dir, "README.md", 10, 1_800_000_000);
        write_file(&dir, ".gitkeep", 0, 1_800_000_000);
        std::fs::create_dir(dir.join("nested.zip")).unwrap();

        let retrieval = collection_assets(tmp.path(), CollectionSlug::Slides).await;
        let names: Vec<_> = retrieval
            .items
            .iter()
            .map(|a| a.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["a intro", "b intro", "old deck"]);

        let intro = &retrieval.items[1];
        assert_eq!(intro.size_label, "4.0 KB");
        assert_eq!(intro.href, "/materials/slides/b_intro.pptx");
        assert_eq!(intro.updated_at_epoch, 1_700_000_000_000);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unstatable_entry_skipped_not_whole_collection() {
        let tmp = TempDir::new().unwrap();
        let dir = slides_dir(&tmp);
        write_file(&dir, "deck.pdf", 1, 1_700_000_000);
        std::os::unix::fs::symlink(dir.join("gone.pdf"), dir.join("dangling.pdf")).unwrap();

        let retrieval = collection_assets(tmp.path(), CollectionSlug::Slides).await;
        assert!(retrieval.is_available());
        let names: Vec<_> = retrieval.items.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["deck.pdf"]);
    }

    #[tokio::test]
    async fn test_href_is_percent_encoded() {
        let tmp = TempDir::new().unwrap();
        let dir = slides_dir(&tmp);
        write_file(&dir, "week 1 notes.md", 1, 1_700_000_000);

        let retrieval = collection_assets(tmp.path(), CollectionSlug::Slides).await;
        assert_eq!(
            retrieval.items[0].href,
            "/materials/slides/week%201%20notes.md"
        );
    }

    #[tokio::test]
    async fn test_overview_counts_all_collections() {
        let tmp = TempDir::new().unwrap();
        let dir = slides_dir(&tmp);
        write_file(&dir, "deck.pdf", 1, 1_700_000_000);
        let templates = tmp.path().join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        write_file(&templates, "report.docx", 1, 1_700_000_000);
        write_file(&templates, "sheet.xlsx", 1, 1_700_000_000);

        let overview = materials_overview(tmp.path()).await;
        assert_eq!(overview.collections.len(), 4);
        assert_eq!(overview.total_assets, 3);
        assert_eq!(
            overview
                .get(CollectionSlug::Templates)
                .unwrap()
                .assets
                .items
                .len(),
            2
        );
        assert!(overview.get(CollectionSlug::Summaries).unwrap().assets.items.is_empty());
    }
}
