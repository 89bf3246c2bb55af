//! Downloadable material collections and the files inside them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::utils::date::format_display_date;
use crate::utils::encode_path_segment;
use crate::utils::text::display_name_from_file;

/// Extensions (lowercase, without dot) that are published.
pub const ALLOWED_EXTENSIONS: [&str; 10] = [
    "pdf", "ppt", "pptx", "doc", "docx", "xlsx", "csv", "zip", "md", "txt",
];

/// Files that live in collection folders but are never published.
pub const SENTINEL_FILES: [&str; 2] = [".gitkeep", "README.md"];

/// One of the fixed material collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionSlug {
    Slides,
    Summaries,
    Roadmaps,
    Templates,
}

impl CollectionSlug {
    pub const ALL: [CollectionSlug; 4] = [
        CollectionSlug::Slides,
        CollectionSlug::Summaries,
        CollectionSlug::Roadmaps,
        CollectionSlug::Templates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionSlug::Slides => "slides",
            CollectionSlug::Summaries => "summaries",
            CollectionSlug::Roadmaps => "roadmaps",
            CollectionSlug::Templates => "templates",
        }
    }
}

impl fmt::Display for CollectionSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionSlug {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slug| slug.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::validation(format!("Unknown material collection '{s}'")))
    }
}

/// Catalogue entry describing a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCollection {
    pub slug: CollectionSlug,
    pub title: String,
    pub description: String,
    pub href: String,
    pub upload_path: String,
    pub tags: Vec<String>,
}

impl MaterialCollection {
    fn new(slug: CollectionSlug, title: &str, description: &str, tags: [&str; 3]) -> Self {
        Self {
            slug,
            title: title.to_string(),
            description: description.to_string(),
            href: format!("/materials/{slug}"),
            upload_path: format!("/public/materials/{slug}/"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// The full catalogue, in display order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::new(
                CollectionSlug::Slides,
                "Presentation Slides",
                "I use this collection for lecture decks, workshop presentations, and visual explainers.",
                ["Lecture decks", "Workshop slides", "Visual explainers"],
            ),
            Self::new(
                CollectionSlug::Summaries,
                "Technical Summaries",
                "I publish concise summaries that turn dense papers and methods into practical notes.",
                ["Paper summaries", "Method notes", "Research workflows"],
            ),
            Self::new(
                CollectionSlug::Roadmaps,
                "Learning Roadmaps",
                "I map structured study paths from fundamentals to hands-on photonics and modeling practice.",
                ["Progression plans", "Milestones", "Project readiness"],
            ),
            Self::new(
                CollectionSlug::Templates,
                "Templates",
                "I keep reusable templates here for reporting, presentation structure, and technical documentation.",
                ["Report templates", "Slide structures", "Documentation assets"],
            ),
        ]
    }

    /// Look up a collection by slug.
    pub fn find(slug: CollectionSlug) -> Option<Self> {
        Self::all().into_iter().find(|c| c.slug == slug)
    }
}

/// Directory entry as reported by a listing plus stat.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub file_name: String,
    pub is_file: bool,
    pub size: u64,
    pub modified: SystemTime,
}

/// A published file. Identified by `file_name` within its collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialAsset {
    pub file_name: String,
    pub display_name: String,
    pub href: String,
    /// Uppercase extension, e.g. `PDF`
    pub extension: String,
    pub size_label: String,
    /// Modification date, `MMM D, YYYY`
    pub updated_at: String,
    /// Modification time in epoch milliseconds
    pub updated_at_epoch: i64,
}

impl MaterialAsset {
    /// Turn a directory entry into an asset.
    ///
    /// Non-files, sentinel files and extensions outside [`ALLOWED_EXTENSIONS`]
    /// yield `None`.
    pub fn from_entry(slug: CollectionSlug, entry: &FileEntry) -> Option<Self> {
        if !entry.is_file || SENTINEL_FILES.contains(&entry.file_name.as_str()) {
            return None;
        }

        let extension = Path::new(&entry.file_name)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_lowercase();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }

        let display_name = match display_name_from_file(&entry.file_name) {
            name if name.is_empty() => entry.file_name.clone(),
            name => name,
        };
        let modified: DateTime<Utc> = entry.modified.into();

        Some(Self {
            href: format!(
                "/materials/{}/{}",
                slug,
                encode_path_segment(&entry.file_name)
            ),
            file_name: entry.file_name.clone(),
            display_name,
            extension: extension.to_uppercase(),
            size_label: format_bytes(entry.size),
            updated_at: format_display_date(&modified),
            updated_at_epoch: modified.timestamp_millis(),
        })
    }
}

/// Human-readable file size: bytes, then KB/MB/GB in steps of 1024.
///
/// One decimal place below 10 units, none from 10 up.
pub fn format_bytes(size: u64) -> String {
    if size < 1024 {
        return format!("{size} B");
    }

    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    let mut value = size as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value >= 10.0 {
        format!("{value:.0} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
