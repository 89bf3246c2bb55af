// src/models/mod.rs

//! Domain models for the portfolio content pipeline.
//!
//! Each record type carries its raw (as-fetched) shape and the canonical
//! shape the rest of the crate works with.

mod article;
mod config;
mod material;
mod repository;
mod talk;

// Re-export all public types
pub use article::{Article, EXCERPT_CHARS, FALLBACK_TAG, fallback_articles};
pub use config::{Config, ContactInfo, HttpConfig, LimitsConfig, SiteConfig, SocialLinks, SourcesConfig};
pub use material::{
    ALLOWED_EXTENSIONS, CollectionSlug, FileEntry, MaterialAsset, MaterialCollection,
    SENTINEL_FILES, format_bytes,
};
pub use repository::{
    EXCLUDED_REPOSITORY_NAMES, MAX_TOPICS, RawRepository, Repository, UNSPECIFIED_LANGUAGE,
};
pub use talk::{RawTalk, Talk, fallback_talks, spotlight};
