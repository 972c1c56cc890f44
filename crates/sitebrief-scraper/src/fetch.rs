//! Single-shot HTML page fetcher.

use std::time::Duration;

use reqwest::Client;
use sitebrief_core::{AppConfig, FetchStatus};

use crate::error::ScraperError;
use crate::urls::normalize_url;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

/// Result of one page request. Always produced; failures live in `status`.
#[derive(Debug, Clone)]
pub struct PageFetch {
    pub requested_url: String,
    /// URL after redirects, or the requested URL when no response arrived.
    pub final_url: String,
    pub status: FetchStatus,
    /// Response body. Present for non-2xx responses too, so error pages can
    /// still be mined for contact details.
    pub body: Option<String>,
}

/// HTTP client for site pages.
///
/// Each call is a single attempt bounded by the configured timeout; there is
/// no retry. Failures are reported through [`FetchStatus`] rather than
/// returned as errors so that one bad page never aborts an analysis.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a `PageFetcher` from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(config.fetch_timeout_secs, &config.user_agent)
    }

    /// Fetches one page. The URL is normalized first (scheme added,
    /// fragment removed).
    pub async fn fetch(&self, url: &str) -> PageFetch {
        let target = match normalize_url(url) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!(url, error = %e, "refusing to fetch invalid URL");
                return PageFetch {
                    requested_url: url.to_string(),
                    final_url: url.to_string(),
                    status: FetchStatus::NetworkError {
                        reason: e.to_string(),
                    },
                    body: None,
                };
            }
        };
        let requested_url = target.to_string();

        tracing::debug!(url = %requested_url, "fetching page");

        let response = match self
            .client
            .get(target)
            .header(reqwest::header::ACCEPT, HTML_ACCEPT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let status = classify_error(&e);
                tracing::warn!(url = %requested_url, status = %status, error = %e, "page fetch failed");
                return PageFetch {
                    final_url: requested_url.clone(),
                    requested_url,
                    status,
                    body: None,
                };
            }
        };

        let final_url = response.url().to_string();
        let http_status = response.status();

        let body = match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                let status = classify_error(&e);
                tracing::warn!(url = %final_url, status = %status, error = %e, "failed reading page body");
                if http_status.is_success() {
                    return PageFetch {
                        requested_url,
                        final_url,
                        status,
                        body: None,
                    };
                }
                None
            }
        };

        let status = if http_status.is_success() {
            tracing::debug!(url = %final_url, "page fetched");
            FetchStatus::Success
        } else {
            tracing::warn!(
                url = %final_url,
                status = http_status.as_u16(),
                "page returned non-success status"
            );
            FetchStatus::HttpError {
                code: http_status.as_u16(),
            }
        };

        PageFetch {
            requested_url,
            final_url,
            status,
            body,
        }
    }
}

fn classify_error(error: &reqwest::Error) -> FetchStatus {
    if error.is_timeout() {
        FetchStatus::Timeout
    } else {
        FetchStatus::NetworkError {
            reason: error.to_string(),
        }
    }
}
