// src/utils/http.rs

//! HTTP client utilities.
//!
//! Content sources talk to the network through the [`Fetch`] trait so the
//! normalization code can be exercised without it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL};

use crate::error::Result;
use crate::models::HttpConfig;

/// A single GET request against an external content source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    pub url: String,
    /// Value of the `Accept` header, if the source needs one
    pub accept: Option<String>,
    /// Revalidation hint in seconds, sent as `Cache-Control: max-age`
    pub revalidate_secs: Option<u64>,
}

impl SourceRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            accept: None,
            revalidate_secs: None,
        }
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn revalidate(mut self, secs: u64) -> Self {
        self.revalidate_secs = (secs > 0).then_some(secs);
        self
    }
}

/// Source of response bodies.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch the body of a successful response as text.
    ///
    /// Transport failures and non-2xx statuses are errors.
    async fn get_text(&self, request: &SourceRequest) -> Result<String>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// [`Fetch`] implementation backed by `reqwest`.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, request: &SourceRequest) -> Result<String> {
        let mut builder = self.client.get(&request.url);
        if let Some(accept) = &request.accept {
            builder = builder.header(ACCEPT, accept);
        }
        if let Some(secs) = request.revalidate_secs {
            builder = builder.header(CACHE_CONTROL, format!("max-age={secs}"));
        }

        let response = builder.send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
