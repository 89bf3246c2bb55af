//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::profile_account;

/// Root application configuration.
///
/// Built once at startup and shared by reference; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Site metadata and social profiles
    #[serde(default)]
    pub site: SiteConfig,

    /// Where each content list comes from
    #[serde(default)]
    pub sources: SourcesConfig,

    /// List size limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        Url::parse(&self.site.url)?;
        Url::parse(&self.site.social.medium_rss)?;
        Url::parse(&self.sources.github_api_base)?;
        if self.github_account().is_none() {
            return Err(AppError::config(
                "site.social.github has no account segment",
            ));
        }
        if self.sources.repos_per_page == 0 || self.sources.repos_per_page > 100 {
            return Err(AppError::config(
                "sources.repos_per_page must be between 1 and 100",
            ));
        }
        Ok(())
    }

    /// Account name taken from the GitHub profile URL.
    pub fn github_account(&self) -> Option<String> {
        profile_account(&self.site.social.github)
    }

    /// Resolve the talks file relative to `base`.
    pub fn talks_path(&self, base: &Path) -> PathBuf {
        base.join(&self.sources.talks_path)
    }

    /// Resolve the materials root relative to `base`.
    pub fn materials_root(&self, base: &Path) -> PathBuf {
        base.join(&self.sources.materials_root)
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Revalidation hint attached to the repository fetch (0 disables it)
    #[serde(default = "defaults::revalidate")]
    pub revalidate_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            revalidate_secs: defaults::revalidate(),
        }
    }
}

/// Site metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "defaults::site_name")]
    pub name: String,

    #[serde(default = "defaults::site_url")]
    pub url: String,

    #[serde(default = "defaults::site_locale")]
    pub locale: String,

    #[serde(default)]
    pub social: SocialLinks,

    #[serde(default)]
    pub contact: ContactInfo,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: defaults::site_name(),
            url: defaults::site_url(),
            locale: defaults::site_locale(),
            social: SocialLinks::default(),
            contact: ContactInfo::default(),
        }
    }
}

/// Public profile links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub linkedin: String,
    pub github: String,
    pub orcid: String,
    pub arxiv: String,
    pub twitter: String,
    pub medium: String,
    /// RSS feed the article list is built from
    pub medium_rss: String,
    pub telegram: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            linkedin: "https://linkedin.com/in/iabdul-aal".into(),
            github: "https://github.com/iabdul-aal".into(),
            orcid: "https://orcid.org/0009-0004-9300-3936".into(),
            arxiv: "https://arxiv.org/abs/2510.00357".into(),
            twitter: "https://twitter.com/iabdul_aal".into(),
            medium: "https://medium.com/@iabdul-aal".into(),
            medium_rss: "https://medium.com/feed/@iabdul-aal".into(),
            telegram: "https://t.me/iabdul_aal".into(),
        }
    }
}

/// Contact details shown on the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: String,
    pub location: String,
    pub timezone: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: "eslam.ibrahim2026@alexu.edu.eg".into(),
            location: "Alexandria, Egypt".into(),
            timezone: "EET (UTC+2)".into(),
        }
    }
}

/// Content source locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Base URL of the repository listing API
    #[serde(default = "defaults::github_api_base")]
    pub github_api_base: String,

    /// Page size requested from the repository API
    #[serde(default = "defaults::repos_per_page")]
    pub repos_per_page: u32,

    /// JSON file with talk records
    #[serde(default = "defaults::talks_path")]
    pub talks_path: PathBuf,

    /// Directory holding one sub-directory per material collection
    #[serde(default = "defaults::materials_root")]
    pub materials_root: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            github_api_base: defaults::github_api_base(),
            repos_per_page: defaults::repos_per_page(),
            talks_path: defaults::talks_path(),
            materials_root: defaults::materials_root(),
        }
    }
}

/// Maximum list sizes. Zero or negative means unlimited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "defaults::article_limit")]
    pub articles: i64,

    #[serde(default = "defaults::repository_limit")]
    pub repositories: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            articles: defaults::article_limit(),
            repositories: defaults::repository_limit(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // HTTP defaults
    pub fn user_agent() -> String {
        "iabdul-aal-website".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn revalidate() -> u64 {
        21_600
    }

    // Site defaults
    pub fn site_name() -> String {
        "Islam I. Abdulaal".into()
    }
    pub fn site_url() -> String {
        "https://iabdul-aal.github.io".into()
    }
    pub fn site_locale() -> String {
        "en_US".into()
    }

    // Source defaults
    pub fn github_api_base() -> String {
        "https://api.github.com".into()
    }
    pub fn repos_per_page() -> u32 {
        100
    }
    pub fn talks_path() -> PathBuf {
        PathBuf::from("talks.json")
    }
    pub fn materials_root() -> PathBuf {
        PathBuf::from("public/materials")
    }

    // Limit defaults
    pub fn article_limit() -> i64 {
        6
    }
    pub fn repository_limit() -> i64 {
        60
    }
}
