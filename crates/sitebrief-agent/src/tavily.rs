//! Tavily web-search client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use sitebrief_core::AppConfig;

use crate::error::{AgentError, SearchError};
use crate::traits::{SearchHit, SearchService};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'static str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

/// Search service backed by Tavily's `/search` endpoint at basic depth.
pub struct TavilyClient {
    client: Client,
    api_key: String,
    max_results: usize,
    endpoint: Url,
}

impl std::fmt::Debug for TavilyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TavilyClient")
            .field("api_key", &"[redacted]")
            .field("max_results", &self.max_results)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl TavilyClient {
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, max_results: usize, timeout_secs: u64) -> Result<Self, AgentError> {
        Self::with_base_url(api_key, max_results, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AgentError> {
        Self::new(
            &config.tavily_api_key,
            config.search_max_results,
            config.search_timeout_secs,
        )
    }

    /// Creates a client against a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the client cannot be built, or
    /// [`AgentError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        max_results: usize,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let endpoint = Url::parse(&format!("{}/search", base_url.trim_end_matches('/')))
            .map_err(|e| AgentError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            max_results,
            endpoint,
        })
    }
}

#[async_trait]
impl SearchService for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        tracing::debug!(query, max_results = self.max_results, "sending Tavily search");

        let request = TavilyRequest {
            api_key: &self.api_key,
            query,
            search_depth: "basic",
            max_results: self.max_results,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Tavily search rejected");
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TavilyResponse = response.json().await?;
        let hits: Vec<SearchHit> = body
            .results
            .into_iter()
            .filter(|r| !r.url.trim().is_empty())
            .map(|r| SearchHit {
                title: r.title.trim().to_string(),
                source_url: r.url.trim().to_string(),
                snippet: r.content.trim().to_string(),
            })
            .collect();

        tracing::debug!(query, hits = hits.len(), "Tavily search complete");
        Ok(hits)
    }
}
