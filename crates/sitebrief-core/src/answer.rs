use serde::Serialize;

/// Which branch of the answer router produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Context,
    WebSearch,
    Hybrid,
    Unavailable,
}

impl AnswerSource {
    /// Shown next to every answer. The tag reflects which branch ran, not
    /// whether the model actually followed its sourcing instructions.
    pub const PROVENANCE_NOTE: &'static str = "Source tags are a best-effort classification of how the answer was produced; the model is not guaranteed to have used only that source.";

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerSource::Context => "context",
            AnswerSource::WebSearch => "web_search",
            AnswerSource::Hybrid => "hybrid",
            AnswerSource::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One answered question. Never persisted or merged with earlier answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    pub question: String,
    pub answer: String,
    pub source: AnswerSource,
    /// Search result URLs handed to the generator; empty when search did not run.
    pub citations: Vec<String>,
}
