//! Entry point for front-ends: analyze a site, then ask about it.

use std::sync::Arc;

use sitebrief_core::{AnswerResult, AppConfig, CompanyProfile};
use sitebrief_scraper::{analyze_site, PageFetcher, ScraperError};

use crate::error::AgentError;
use crate::gemini::GeminiClient;
use crate::router;
use crate::summarize::summarize;
use crate::tavily::TavilyClient;
use crate::traits::{SearchService, TextGenerator};

/// Owns the page fetcher and the two AI services for one process.
pub struct Analyst {
    fetcher: PageFetcher,
    generator: Arc<dyn TextGenerator>,
    search: Arc<dyn SearchService>,
    about_text_budget: usize,
}

impl Analyst {
    /// Wires the production Gemini and Tavily clients from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if any HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AgentError> {
        Ok(Self::new(
            PageFetcher::from_config(config)?,
            Arc::new(GeminiClient::from_config(config)?),
            Arc::new(TavilyClient::from_config(config)?),
            config.about_text_max_chars,
        ))
    }

    #[must_use]
    pub fn new(
        fetcher: PageFetcher,
        generator: Arc<dyn TextGenerator>,
        search: Arc<dyn SearchService>,
        about_text_budget: usize,
    ) -> Self {
        Self {
            fetcher,
            generator,
            search,
            about_text_budget,
        }
    }

    /// Scrapes `url` and attaches an AI summary when one can be produced.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] only when `url` is unusable;
    /// page and summary failures are recorded in the profile instead.
    pub async fn analyze(&self, url: &str) -> Result<CompanyProfile, ScraperError> {
        let mut profile = self.scrape(url).await?;

        match summarize(self.generator.as_ref(), profile.about_text()).await {
            Ok(summary) => {
                profile.set_summary(summary);
            }
            Err(e) => {
                tracing::info!(url = profile.url(), reason = %e, "profile has no summary");
            }
        }

        Ok(profile)
    }

    /// Scrapes `url` without calling the generation service.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] when `url` is unusable.
    pub async fn scrape(&self, url: &str) -> Result<CompanyProfile, ScraperError> {
        analyze_site(&self.fetcher, url, self.about_text_budget).await
    }

    /// Answers a free-form question about an analyzed profile.
    pub async fn ask(&self, question: &str, profile: &CompanyProfile) -> AnswerResult {
        router::answer(
            question,
            profile,
            self.generator.as_ref(),
            self.search.as_ref(),
        )
        .await
    }
}
