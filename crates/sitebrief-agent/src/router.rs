//! Context-first question answering with web-search fallback.
//!
//! A question is first put to the generator with the profile's scraped text
//! as the only allowed source. When that text is missing, the call fails, or
//! the reply admits the context is insufficient, the router searches the web
//! and asks again over the search results. The returned [`AnswerSource`]
//! names the branch that produced the answer.

use reqwest::Url;
use sitebrief_core::{AnswerResult, AnswerSource, CompanyProfile};
use sitebrief_scraper::truncate_at_word_boundary;

use crate::traits::{GenerationRequest, SearchHit, SearchService, TextGenerator};

/// Context at or below this length is treated as absent.
pub const CONTEXT_MIN_CHARS: usize = 20;

const CONTEXT_MAX_CHARS: usize = 3000;

/// A flagged reply must keep at least this much text to count as a partial answer.
const MIN_PARTIAL_ANSWER_CHARS: usize = 40;

/// Sentence the model is told to emit when the context falls short.
pub const INSUFFICIENCY_MARKER: &str = "I don't have enough information in the provided context";

/// Lower-cased phrases that flag a context reply as insufficient. Models
/// paraphrase the requested sentence, so close variants are listed too.
const INSUFFICIENCY_MARKERS: [&str; 12] = [
    "i don't have enough information",
    "i do not have enough information",
    "not enough information in the provided context",
    "the provided context does not",
    "the provided context doesn't",
    "the context does not",
    "the context doesn't",
    "context does not contain",
    "context doesn't contain",
    "not mentioned in the context",
    "cannot be determined from the context",
    "no information about this in the context",
];

/// Outcome of the context-only attempt.
enum ContextAttempt {
    Answered(String),
    /// The reply flagged insufficiency; `partial` is what remains once the
    /// marker sentences are removed, if substantial.
    Flagged {
        reply: String,
        partial: Option<String>,
    },
    Skipped,
}

/// Answers `question` about `profile`. Never fails: every service error
/// degrades to another branch or to [`AnswerSource::Unavailable`].
pub async fn answer(
    question: &str,
    profile: &CompanyProfile,
    generator: &dyn TextGenerator,
    search: &dyn SearchService,
) -> AnswerResult {
    let question = question.trim();
    let company = profile.display_name();

    let attempt = match usable_context(profile) {
        Some(context) => ask_context(question, &company, profile.url(), &context, generator).await,
        None => {
            tracing::debug!(url = profile.url(), "no usable context; going straight to search");
            ContextAttempt::Skipped
        }
    };

    let (flagged_reply, partial) = match attempt {
        ContextAttempt::Answered(reply) => {
            return finish(question, reply, AnswerSource::Context, Vec::new());
        }
        ContextAttempt::Flagged { reply, partial } => (Some(reply), partial),
        ContextAttempt::Skipped => (None, None),
    };

    let query = search_query(question, &company, profile.url());
    let hits = match search.search(&query).await {
        Ok(hits) if !hits.is_empty() => hits,
        Ok(_) => {
            tracing::warn!(query = %query, "web search returned no results");
            return degrade_without_search(question, flagged_reply, "returned no results");
        }
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "web search failed");
            return degrade_without_search(question, flagged_reply, "was unavailable");
        }
    };

    let citations: Vec<String> = hits.iter().map(|hit| hit.source_url.clone()).collect();
    let request = search_request(question, &company, profile.url(), &hits, partial.as_deref());

    match generate_text(generator, &request).await {
        Some(reply) => {
            let source = if partial.is_some() {
                AnswerSource::Hybrid
            } else {
                AnswerSource::WebSearch
            };
            finish(question, reply, source, citations)
        }
        None => match partial {
            Some(partial) => finish(question, partial, AnswerSource::Context, Vec::new()),
            None => finish(
                question,
                snippet_digest(&hits),
                AnswerSource::WebSearch,
                citations,
            ),
        },
    }
}

fn finish(
    question: &str,
    answer: String,
    source: AnswerSource,
    citations: Vec<String>,
) -> AnswerResult {
    tracing::info!(source = %source, citations = citations.len(), "question answered");
    AnswerResult {
        question: question.to_string(),
        answer,
        source,
        citations,
    }
}

fn degrade_without_search(
    question: &str,
    flagged_reply: Option<String>,
    search_outcome: &str,
) -> AnswerResult {
    match flagged_reply {
        Some(reply) => finish(question, reply, AnswerSource::Context, Vec::new()),
        None => finish(
            question,
            format!(
                "No answer could be found: the website content did not cover this question and web search {search_outcome}."
            ),
            AnswerSource::Unavailable,
            Vec::new(),
        ),
    }
}

fn usable_context(profile: &CompanyProfile) -> Option<String> {
    let text = profile.about_text()?.trim();
    if text.chars().count() <= CONTEXT_MIN_CHARS {
        return None;
    }
    truncate_at_word_boundary(text, CONTEXT_MAX_CHARS)
}

async fn ask_context(
    question: &str,
    company: &str,
    url: &str,
    context: &str,
    generator: &dyn TextGenerator,
) -> ContextAttempt {
    let prompt = format!(
        "You are answering a question about {company} ({url}). Use ONLY the CONTEXT above, which was scraped from the company's website. \
         Answer the QUESTION concisely. If the CONTEXT does not contain the information needed, include the exact sentence \
         \"{INSUFFICIENCY_MARKER}.\" and do not guess.\n\nQUESTION: {question}"
    );
    let request = GenerationRequest::new(prompt).with_context(format!("CONTEXT:\n{context}"));

    let Some(reply) = generate_text(generator, &request).await else {
        return ContextAttempt::Skipped;
    };

    if !is_insufficient(&reply) {
        return ContextAttempt::Answered(reply);
    }

    let remainder = strip_marker_sentences(&reply);
    let partial = (remainder.chars().count() >= MIN_PARTIAL_ANSWER_CHARS).then_some(remainder);
    tracing::debug!(partial = partial.is_some(), "context reply flagged as insufficient");
    ContextAttempt::Flagged { reply, partial }
}

/// Generation with failures and blank replies folded into `None`.
async fn generate_text(generator: &dyn TextGenerator, request: &GenerationRequest) -> Option<String> {
    match generator.generate(request).await {
        Ok(reply) => {
            let reply = reply.trim();
            if reply.is_empty() {
                tracing::warn!("generation returned an empty reply");
                None
            } else {
                Some(reply.to_string())
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "generation failed");
            None
        }
    }
}

fn search_query(question: &str, company: &str, url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()));
    match host {
        Some(host) => format!("{question} {company} {host}"),
        None => format!("{question} {company}"),
    }
}

fn search_request(
    question: &str,
    company: &str,
    url: &str,
    hits: &[SearchHit],
    partial: Option<&str>,
) -> GenerationRequest {
    let results = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "[{}] {}\nURL: {}\n{}",
                i + 1,
                hit.title,
                hit.source_url,
                hit.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let prior = partial.map_or_else(String::new, |partial| {
        format!(
            "The company's website already provided this partial answer; combine it with the search results:\n{partial}\n\n"
        )
    });

    let prompt = format!(
        "Answer the QUESTION about {company} ({url}) using the numbered WEB SEARCH RESULTS above. \
         Say that web search was used and cite 1-2 of the source URLs you relied on. \
         If the results do not answer the question, say so.\n\n{prior}QUESTION: {question}"
    );

    GenerationRequest::new(prompt).with_context(format!("WEB SEARCH RESULTS:\n{results}"))
}

/// Fallback text listing raw search snippets when the second generation failed.
fn snippet_digest(hits: &[SearchHit]) -> String {
    let mut digest =
        String::from("An AI answer could not be generated. Top web search results:");
    for hit in hits {
        digest.push_str("\n- ");
        if !hit.title.is_empty() {
            digest.push_str(&hit.title);
            digest.push_str(": ");
        }
        digest.push_str(&hit.snippet);
        digest.push_str(" (");
        digest.push_str(&hit.source_url);
        digest.push(')');
    }
    digest
}

fn normalize_for_markers(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'").to_lowercase()
}

pub(crate) fn is_insufficient(reply: &str) -> bool {
    let normalized = normalize_for_markers(reply);
    INSUFFICIENCY_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}

/// Drops every sentence carrying an insufficiency marker.
pub(crate) fn strip_marker_sentences(reply: &str) -> String {
    split_sentences(reply)
        .into_iter()
        .filter(|sentence| !is_insufficient(sentence))
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let end = match c {
            '\n' => Some(idx),
            '.' | '!' | '?' => match chars.peek() {
                None => Some(idx + c.len_utf8()),
                Some((_, next)) if next.is_whitespace() => Some(idx + c.len_utf8()),
                Some(_) => None,
            },
            _ => None,
        };
        if let Some(end) = end {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
