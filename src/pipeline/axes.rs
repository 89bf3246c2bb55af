// src/pipeline/axes.rs

//! Filter axes and search text for each record type.

use crate::models::{Article, MaterialAsset, Repository, Talk, UNSPECIFIED_LANGUAGE};
use crate::pipeline::filter::{Axis, Filterable};
use crate::utils::date::UNKNOWN_YEAR;

pub const ALL_TOPICS: &str = "All topics";
pub const ALL_YEARS: &str = "All years";
pub const ALL_LANGUAGES: &str = "All languages";
pub const ALL_REPOSITORY_TYPES: &str = "All repository types";
pub const ANY_STATUS: &str = "Any status";
pub const ALL_FORMATS: &str = "All formats";
pub const ALL_SOURCES: &str = "All sources";
pub const ALL_FILE_TYPES: &str = "All file types";

pub const ORIGINAL_REPOSITORIES: &str = "Original repositories";
pub const FORKED_REPOSITORIES: &str = "Forked repositories";
pub const ACTIVE_ONLY: &str = "Active only";
pub const ARCHIVED_ONLY: &str = "Archived only";

impl Filterable for Article {
    fn axes() -> Vec<Axis<Self>> {
        vec![
            Axis::derived("topic", "Topic", ALL_TOPICS, |a: &Article| a.tag.clone()),
            Axis::derived("year", "Year", ALL_YEARS, |a: &Article| a.year())
                .newest_first()
                .unknown_last(UNKNOWN_YEAR),
        ]
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.excerpt, self.tag)
    }
}

impl Filterable for Repository {
    fn axes() -> Vec<Axis<Self>> {
        vec![
            Axis::derived("language", "Language", ALL_LANGUAGES, |r: &Repository| {
                r.language_label().to_string()
            })
            .unknown_last(UNSPECIFIED_LANGUAGE),
            Axis::fixed(
                "type",
                "Repository type",
                ALL_REPOSITORY_TYPES,
                &[ORIGINAL_REPOSITORIES, FORKED_REPOSITORIES],
                |r: &Repository, selected: &str| match selected {
                    ORIGINAL_REPOSITORIES => !r.is_fork,
                    FORKED_REPOSITORIES => r.is_fork,
                    _ => false,
                },
            ),
            Axis::fixed(
                "status",
                "Status",
                ANY_STATUS,
                &[ACTIVE_ONLY, ARCHIVED_ONLY],
                |r: &Repository, selected: &str| match selected {
                    ACTIVE_ONLY => !r.is_archived,
                    ARCHIVED_ONLY => r.is_archived,
                    _ => false,
                },
            ),
        ]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name,
            self.description,
            self.language,
            self.topics.join(" "),
            self.year()
        )
    }
}

impl Filterable for Talk {
    fn axes() -> Vec<Axis<Self>> {
        vec![
            Axis::derived("format", "Format", ALL_FORMATS, |t: &Talk| t.format.clone()),
            Axis::derived("source", "Source", ALL_SOURCES, |t: &Talk| t.source.clone()),
            Axis::derived("year", "Year", ALL_YEARS, |t: &Talk| t.filter_year())
                .newest_first()
                .unknown_last(UNKNOWN_YEAR),
        ]
    }

    fn search_text(&self) -> String {
        format!("{} {} {} {}", self.title, self.event, self.source, self.format)
    }
}

impl Filterable for MaterialAsset {
    fn axes() -> Vec<Axis<Self>> {
        vec![Axis::derived(
            "type",
            "File type",
            ALL_FILE_TYPES,
            |a: &MaterialAsset| a.extension.clone(),
        )]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.display_name, self.file_name, self.extension, self.updated_at
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawRepository, RawTalk, fallback_articles};
    use crate::pipeline::filter::FilterEngine;
    use serde_json::json;

    fn repos() -> Vec<Repository> {
        [
            json!({"name": "fdtd", "html_url": "https://x/1", "language": "Rust",
                   "topics": ["photonics"], "updated_at": "2024-02-01T00:00:00Z"}),
            json!({"name": "notes", "html_url": "https://x/2", "fork": true,
                   "updated_at": "2022-02-01T00:00:00Z"}),
            json!({"name": "legacy", "html_url": "https://x/3", "language": "C",
                   "archived": true}),
        ]
        .into_iter()
        .filter_map(|v| Repository::normalize(&serde_json::from_value::<RawRepository>(v).unwrap()))
        .collect()
    }

    #[test]
    fn test_repository_language_options_put_unspecified_last() {
        let items = repos();
        let engine = FilterEngine::new(&items);
        assert_eq!(
            engine.options()[0].options,
            vec![ALL_LANGUAGES, "C", "Rust", UNSPECIFIED_LANGUAGE]
        );
    }

    #[test]
    fn test_repository_type_and_status_axes() {
        let items = repos();
        let engine = FilterEngine::new(&items);

        let forks = engine
            .apply_axis(&engine.initial_state(), "type", FORKED_REPOSITORIES)
            .unwrap();
        let names: Vec<_> = engine.view(&forks).visible.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["notes"]);

        let archived = engine
            .apply_axis(&engine.initial_state(), "status", ARCHIVED_ONLY)
            .unwrap();
        let names: Vec<_> = engine.view(&archived).visible.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["legacy"]);
    }

    #[test]
    fn test_repository_search_covers_topics_and_year() {
        let items = repos();
        let engine = FilterEngine::new(&items);

        let by_topic = engine.apply_query(&engine.initial_state(), "PHOTONICS");
        assert_eq!(engine.view(&by_topic).shown(), 1);

        let by_year = engine.apply_query(&engine.initial_state(), "2022");
        assert_eq!(engine.view(&by_year).visible[0].name, "notes");
    }

    #[test]
    fn test_article_axes() {
        let mut items = fallback_articles();
        items[0].tag = "Optics".to_string();
        items[1].published_at = "Mar 1, 2025".to_string();
        items[2].published_at = "draft".to_string();

        let engine = FilterEngine::new(&items);
        assert_eq!(
            engine.options()[0].options,
            vec![ALL_TOPICS, "Medium Article", "Optics"]
        );
        assert_eq!(
            engine.options()[1].options,
            vec![ALL_YEARS, "2025", "2024", UNKNOWN_YEAR]
        );

        let state = engine
            .apply_axis(&engine.initial_state(), "year", UNKNOWN_YEAR)
            .unwrap();
        assert_eq!(engine.view(&state).visible[0].published_at, "draft");
    }

    #[test]
    fn test_talk_axes_and_search() {
        let items: Vec<Talk> = [
            json!({"title": "Silicon Photonics 101", "url": "https://t/1", "source": "YouTube", "date": "2024-04-02"}),
            json!({"title": "Panel", "url": "https://t/2", "event": "PhotonicsWest", "format": "Panel"}),
        ]
        .into_iter()
        .filter_map(|v| Talk::normalize(&serde_json::from_value::<RawTalk>(v).unwrap()))
        .collect();

        let engine = FilterEngine::new(&items);
        assert_eq!(
            engine.options()[0].options,
            vec![ALL_FORMATS, "Panel", "Technical Talk"]
        );
        assert_eq!(
            engine.options()[1].options,
            vec![ALL_SOURCES, "Public source", "YouTube"]
        );
        assert_eq!(
            engine.options()[2].options,
            vec![ALL_YEARS, "2024", UNKNOWN_YEAR]
        );

        let state = engine.apply_query(&engine.initial_state(), "photonicswest");
        assert_eq!(engine.view(&state).visible[0].title, "Panel");
    }

    #[test]
    fn test_talk_year_options_only_list_four_digit_years() {
        let items: Vec<Talk> = [
            json!({"title": "A", "url": "https://t/1", "year": "2023/24"}),
            json!({"title": "B", "url": "https://t/2", "year": "TBD"}),
            json!({"title": "C", "url": "https://t/3", "year": "2021"}),
        ]
        .into_iter()
        .filter_map(|v| Talk::normalize(&serde_json::from_value::<RawTalk>(v).unwrap()))
        .collect();

        let engine = FilterEngine::new(&items);
        assert_eq!(
            engine.options()[2].options,
            vec![ALL_YEARS, "2021", UNKNOWN_YEAR]
        );

        let state = engine
            .apply_axis(&engine.initial_state(), "year", UNKNOWN_YEAR)
            .unwrap();
        assert_eq!(engine.view(&state).shown(), 2);
    }

    #[test]
    fn test_material_type_axis() {
        let asset = |name: &str, ext: &str| MaterialAsset {
            file_name: name.to_string(),
            display_name: name.to_string(),
            href: String::new(),
            extension: ext.to_string(),
            size_label: "1 B".to_string(),
            updated_at: "Mar 1, 2024".to_string(),
            updated_at_epoch: 0,
        };
        let items = vec![asset("a.pdf", "PDF"), asset("b.zip", "ZIP"), asset("c.pdf", "PDF")];
        let engine = FilterEngine::new(&items);
        assert_eq!(engine.options()[0].options, vec![ALL_FILE_TYPES, "PDF", "ZIP"]);

        let state = engine.apply_axis(&engine.initial_state(), "type", "PDF").unwrap();
        assert_eq!(engine.view(&state).shown(), 2);

        let state = engine.apply_query(&state, "mar 1");
        assert_eq!(engine.view(&state).shown(), 2);
    }
}
