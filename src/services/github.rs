// src/services/github.rs

//! Public repository listing.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Config, RawRepository, Repository};
use crate::pipeline::assemble::assemble_repositories;
use crate::services::Retrieval;
use crate::utils::http::{Fetch, SourceRequest};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Request for the configured account's public repositories, most recently
/// updated first.
pub fn repositories_request(config: &Config) -> Result<SourceRequest> {
    let account = config
        .github_account()
        .ok_or_else(|| AppError::unavailable("repositories", "no account in GitHub profile URL"))?;

    let url = format!(
        "{}/users/{}/repos?per_page={}&sort=updated&type=public",
        config.sources.github_api_base.trim_end_matches('/'),
        account,
        config.sources.repos_per_page
    );

    Ok(SourceRequest::get(url)
        .accept(GITHUB_ACCEPT)
        .revalidate(config.http.revalidate_secs))
}

/// Normalize and assemble an API response body.
///
/// A body that is valid JSON but not an array yields an empty list; records
/// that fail validation are dropped one by one.
pub fn parse_repositories(body: &str, limit: i64) -> Result<Vec<Repository>> {
    let Value::Array(records) = serde_json::from_str::<Value>(body)? else {
        log::warn!("Repository listing is not a JSON array; treating as empty");
        return Ok(Vec::new());
    };

    let total = records.len();
    let repositories: Vec<Repository> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<RawRepository>(record).ok())
        .filter_map(|raw| Repository::normalize(&raw))
        .collect();

    log::debug!(
        "Repository listing: kept {} of {} records",
        repositories.len(),
        total
    );
    Ok(assemble_repositories(repositories, limit))
}

/// Fetch, normalize and assemble the repository list.
pub async fn fetch_repositories(fetcher: &dyn Fetch, config: &Config) -> Retrieval<Repository> {
    let result = async {
        let request = repositories_request(config)?;
        log::info!("Fetching repositories from {}", request.url);
        let body = fetcher.get_text(&request).await?;
        parse_repositories(&body, config.limits.repositories)
    }
    .await;

    let retrieval = Retrieval::from_result("Repository listing", result);
    log::info!("Repositories: {} listed", retrieval.items.len());
    retrieval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::testing::StubFetcher;

    const LISTING_URL: &str =
        "https://api.github.com/users/iabdul-aal/repos?per_page=100&sort=updated&type=public";

    #[test]
    fn test_request_shape() {
        let request = repositories_request(&Config::default()).unwrap();
        assert_eq!(request.url, LISTING_URL);
        assert_eq!(request.accept.as_deref(), Some(GITHUB_ACCEPT));
        assert_eq!(request.revalidate_secs, Some(21_600));
    }

    #[test]
    fn test_request_without_account_fails() {
        let mut config = Config::default();
        config.site.social.github = "https://github.com".to_string();
        assert!(repositories_request(&config).is_err());
    }

    #[test]
    fn test_parse_filters_and_sorts() {
        let body = r#"[
            {"name": "beta", "html_url": "https://github.com/u/beta", "updated_at": "2024-01-01T00:00:00Z"},
            {"name": "alpha", "html_url": "https://github.com/u/alpha", "updated_at": "2024-01-01T00:00:00Z"},
            {"name": "iabdul-aal.github.io", "html_url": "https://github.com/u/site"},
            {"name": "hidden", "html_url": "https://github.com/u/hidden", "private": true},
            {"name": 42, "html_url": "https://github.com/u/bad-type"},
            {"name": "beta-copy", "html_url": "https://github.com/u/beta"}
        ]"#;

        let names: Vec<_> = parse_repositories(body, 0)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_parse_non_array_is_empty() {
        let body = r#"{"message": "API rate limit exceeded"}"#;
        assert!(parse_repositories(body, 0).unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        assert!(parse_repositories("<html>", 0).is_err());
    }

    #[tokio::test]
    async fn test_fetch_repositories_end_to_end() {
        let fetcher = StubFetcher::default().with(
            LISTING_URL,
            r#"[{"name": "fdtd", "html_url": "https://github.com/u/fdtd", "stargazers_count": 3}]"#,
        );

        let retrieval = fetch_repositories(&fetcher, &Config::default()).await;
        assert!(retrieval.is_available());
        assert_eq!(retrieval.items[0].stars, 3);

        let requests = fetcher.requests.lock().unwrap();
        assert_eq!(requests[0].accept.as_deref(), Some(GITHUB_ACCEPT));
    }

    #[tokio::test]
    async fn test_fetch_repositories_failure_is_empty() {
        let retrieval = fetch_repositories(&StubFetcher::default(), &Config::default()).await;
        assert!(!retrieval.is_available());
        assert!(retrieval.items.is_empty());
    }
}
