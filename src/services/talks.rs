// src/services/talks.rs

//! Talks file loader.

use std::path::Path;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{RawTalk, Talk, fallback_talks};
use crate::pipeline::assemble::assemble_talks;
use crate::services::Retrieval;

/// Parse talks file content into an assembled list.
///
/// Fails when the content is not a JSON array or holds no usable record.
/// Individual records that are malformed are dropped.
pub fn parse_talks(content: &str) -> Result<Vec<Talk>> {
    let Value::Array(records) = serde_json::from_str::<Value>(content)? else {
        return Err(AppError::validation("talks file is not a JSON array"));
    };

    let talks: Vec<Talk> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<RawTalk>(record).ok())
        .filter_map(|raw| Talk::normalize(&raw))
        .collect();

    if talks.is_empty() {
        return Err(AppError::validation("talks file has no valid records"));
    }

    Ok(assemble_talks(talks, 0))
}

/// Load the talks file at `path`.
///
/// A missing, unreadable or unusable file yields the fallback talk list,
/// flagged as unavailable.
pub async fn load_talks(path: &Path) -> Retrieval<Talk> {
    log::info!("Loading talks from {}", path.display());

    let result = match tokio::fs::read_to_string(path).await {
        Ok(content) => parse_talks(&content),
        Err(e) => Err(AppError::Io(e)),
    };

    match result {
        Ok(talks) => {
            log::info!("Talks: {} loaded", talks.len());
            Retrieval::ready(talks)
        }
        Err(error) => {
            log::warn!("Talks file {} unusable, using fallback: {error}", path.display());
            Retrieval::fallback(fallback_talks(), error.to_string())
        }
    }
}
