//! One-shot summary of a profile's descriptive text.

use sitebrief_scraper::truncate_at_word_boundary;

use crate::error::SummaryUnavailable;
use crate::traits::{GenerationRequest, TextGenerator};

/// Shorter text is not worth a service call.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 75;

const SUMMARY_INPUT_MAX_CHARS: usize = 4000;

const SUMMARY_PROMPT: &str = "Concisely summarize the following text about a company in 1-3 short sentences, focusing on its core business or purpose. Reply with the summary only.";

/// Asks the generator for a 1-3 sentence summary of `about_text`.
///
/// # Errors
///
/// Returns [`SummaryUnavailable`] when there is no usable text (no call is
/// made), when the service fails, or when it replies with nothing.
pub async fn summarize(
    generator: &dyn TextGenerator,
    about_text: Option<&str>,
) -> Result<String, SummaryUnavailable> {
    let text = about_text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(SummaryUnavailable::NoText);
    }
    let chars = text.chars().count();
    if chars < MIN_SUMMARY_INPUT_CHARS {
        return Err(SummaryUnavailable::TooShort { chars });
    }

    let excerpt =
        truncate_at_word_boundary(text, SUMMARY_INPUT_MAX_CHARS).ok_or(SummaryUnavailable::NoText)?;
    let request = GenerationRequest::new(SUMMARY_PROMPT).with_context(format!("TEXT:\n{excerpt}"));

    let reply = generator.generate(&request).await.map_err(|e| {
        tracing::warn!(error = %e, "summary generation failed");
        SummaryUnavailable::Service(e)
    })?;

    let summary = reply.trim();
    if summary.is_empty() {
        tracing::warn!("summary generation returned an empty reply");
        return Err(SummaryUnavailable::Empty);
    }
    Ok(summary.to_string())
}
