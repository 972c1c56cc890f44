//! Service seams for text generation and web search.
//!
//! The summarizer and the answer router only see these traits, so tests run
//! them against in-process fakes and production wires in Gemini and Tavily.

use async_trait::async_trait;

use crate::error::{GenerationError, SearchError};

/// One generation call: instructions plus optional grounding material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Source material the prompt refers to, sent ahead of the prompt.
    pub context: Option<String>,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub source_url: String,
    pub snippet: String,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] on timeout, quota, safety block,
    /// transport or API failure, or when the reply holds no text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

#[async_trait]
pub trait SearchService: Send + Sync {
    /// Runs a web search and returns the top hits, best first.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] on timeout, transport or API failure.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}
