use thiserror::Error;

/// Errors constructing the agent's HTTP clients.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Scraper(#[from] sitebrief_scraper::ScraperError),
}

/// Failures of a single text-generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request timed out")]
    Timeout,

    /// The provider rejected the call for rate or quota reasons (HTTP 429).
    #[error("generation quota exceeded: {0}")]
    Quota(String),

    #[error("generation blocked by safety filters: {0}")]
    SafetyBlock(String),

    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("generation API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("generation returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error.without_url())
        }
    }
}

/// Failures of a single web-search call.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("search API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error)
        }
    }
}

/// Why a profile has no summary. Never escalated past the analyst.
#[derive(Debug, Error)]
pub enum SummaryUnavailable {
    #[error("no descriptive text to summarize")]
    NoText,

    #[error("descriptive text too short to summarize ({chars} chars)")]
    TooShort { chars: usize },

    #[error("summary service failed: {0}")]
    Service(#[from] GenerationError),

    #[error("summary service returned an empty reply")]
    Empty,
}
