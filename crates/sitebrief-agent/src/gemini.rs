//! Google Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use sitebrief_core::AppConfig;

use crate::error::{AgentError, GenerationError};
use crate::traits::{GenerationRequest, TextGenerator};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

const TEMPERATURE: f32 = 0.2;

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
    safety_settings: Vec<GeminiSafetySetting>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GeminiSafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

/// Text generator backed by Gemini.
///
/// Use [`GeminiClient::new`] for production or
/// [`GeminiClient::with_base_url`] to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, AgentError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AgentError> {
        Self::new(
            &config.google_api_key,
            &config.gemini_model,
            config.gemini_timeout_secs,
        )
    }

    /// Creates a client against a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Http`] if the client cannot be built, or
    /// [`AgentError::InvalidBaseUrl`] if `base_url` and `model` do not form a
    /// valid endpoint URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let raw = format!(
            "{}/models/{model}:generateContent",
            base_url.trim_end_matches('/')
        );
        let endpoint = Url::parse(&raw).map_err(|e| AgentError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint,
        })
    }

    fn build_body<'a>(request: &'a GenerationRequest) -> GeminiRequest<'a> {
        let mut parts = Vec::with_capacity(2);
        if let Some(context) = request.context.as_deref() {
            parts.push(GeminiPart { text: context });
        }
        parts.push(GeminiPart {
            text: &request.prompt,
        });

        GeminiRequest {
            contents: vec![GeminiContent { role: "user", parts }],
            generation_config: GeminiGenerationConfig {
                temperature: TEMPERATURE,
            },
            safety_settings: HARM_CATEGORIES
                .into_iter()
                .map(|category| GeminiSafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        tracing::debug!(model = %self.model, prompt_chars = request.prompt.len(), "sending Gemini request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::build_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, status = status.as_u16(), "Gemini request rejected");
            return Err(if status.as_u16() == 429 {
                GenerationError::Quota(message)
            } else {
                GenerationError::Api {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let body: GeminiResponse = response.json().await?;

        if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GenerationError::SafetyBlock(reason));
        }

        let Some(candidate) = body.candidates.into_iter().next() else {
            return Err(GenerationError::EmptyResponse);
        };
        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(GenerationError::SafetyBlock(
                "candidate finished with SAFETY".to_string(),
            ));
        }

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        tracing::debug!(model = %self.model, reply_chars = text.len(), "Gemini reply received");
        Ok(text.to_string())
    }
}
