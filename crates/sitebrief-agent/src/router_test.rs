use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sitebrief_core::ProfileParts;

use super::*;
use crate::error::{GenerationError, SearchError};

const FOUNDING: &str = "Acme Corp was founded in 2001 in Austin. It builds reusable rockets for small satellite operators.";

/// Replies from a script, one entry per call, and records every request.
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Result<&str, GenerationError>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("generator called more often than scripted")
    }
}

struct FakeSearch {
    outcome: Result<Vec<SearchHit>, ()>,
    queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    fn returning(hits: Vec<SearchHit>) -> Self {
        Self {
            outcome: Ok(hits),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            outcome: Err(()),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchService for FakeSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        match &self.outcome {
            Ok(hits) => Ok(hits.clone()),
            Err(()) => Err(SearchError::Timeout),
        }
    }
}

/// Fails the test if the router reaches for search.
struct ForbiddenSearch {
    calls: AtomicUsize,
}

#[async_trait]
impl SearchService for ForbiddenSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SearchError::Api {
            status: 500,
            message: "search must not be called".to_string(),
        })
    }
}

fn profile(about_text: Option<&str>) -> CompanyProfile {
    CompanyProfile::from_parts(ProfileParts {
        url: "https://www.acme.com/".to_string(),
        title: Some("Acme Corp | Rockets".to_string()),
        about_text: about_text.map(str::to_string),
        ..ProfileParts::default()
    })
}

fn hits() -> Vec<SearchHit> {
    vec![
        SearchHit {
            title: "Acme Corp - Crunchbase".to_string(),
            source_url: "https://www.crunchbase.com/organization/acme".to_string(),
            snippet: "Acme Corp raised $40M in 2023.".to_string(),
        },
        SearchHit {
            title: "Acme news".to_string(),
            source_url: "https://news.example.org/acme".to_string(),
            snippet: "Acme hires a new CEO.".to_string(),
        },
    ]
}

fn flagged_reply() -> String {
    format!("{INSUFFICIENCY_MARKER}.")
}

// ---------------------------------------------------------------------------
// Context branch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sufficient_context_answers_without_search() {
    let generator = ScriptedGenerator::new(vec![Ok("Acme was founded in 2001.")]);
    let search = ForbiddenSearch {
        calls: AtomicUsize::new(0),
    };

    let result = answer(
        "When was Acme founded?",
        &profile(Some(FOUNDING)),
        &generator,
        &search,
    )
    .await;

    assert_eq!(result.source, AnswerSource::Context);
    assert!(result.answer.contains("2001"));
    assert!(result.citations.is_empty());
    assert_eq!(search.calls.load(Ordering::SeqCst), 0);

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    let context = requests[0].context.as_deref().unwrap();
    assert!(context.contains("founded in 2001"));
    assert!(requests[0].prompt.contains(INSUFFICIENCY_MARKER));
    assert!(requests[0].prompt.contains("When was Acme founded?"));
}

#[tokio::test]
async fn single_sentence_context_is_still_used() {
    let generator = ScriptedGenerator::new(vec![Ok("Acme Corp was founded in 2001.")]);
    let search = ForbiddenSearch {
        calls: AtomicUsize::new(0),
    };

    let result = answer(
        "When was Acme founded?",
        &profile(Some("Acme Corp was founded in 2001 in Austin.")),
        &generator,
        &search,
    )
    .await;

    assert_eq!(result.source, AnswerSource::Context);
    assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    assert_eq!(generator.requests().len(), 1);
}

#[tokio::test]
async fn context_is_capped_before_prompting() {
    let long = "rocket ".repeat(1000);
    let generator = ScriptedGenerator::new(vec![Ok("It makes rockets.")]);
    let search = FakeSearch::returning(hits());

    answer("What does Acme make?", &profile(Some(long.as_str())), &generator, &search).await;

    let context = generator.requests()[0].context.clone().unwrap();
    let body = context.strip_prefix("CONTEXT:\n").unwrap();
    assert!(body.chars().count() <= 3000);
}

// ---------------------------------------------------------------------------
// Search branch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn absent_context_goes_to_search() {
    let generator = ScriptedGenerator::new(vec![Ok("Per web search, Acme raised $40M.")]);
    let search = FakeSearch::returning(hits());

    let result = answer("How much did Acme raise?", &profile(None), &generator, &search).await;

    assert_eq!(result.source, AnswerSource::WebSearch);
    assert_eq!(
        result.citations,
        vec![
            "https://www.crunchbase.com/organization/acme",
            "https://news.example.org/acme"
        ]
    );
    assert_eq!(generator.requests().len(), 1);

    let query = search.queries.lock().unwrap()[0].clone();
    assert!(query.starts_with("How much did Acme raise?"));
    assert!(query.contains("Acme Corp"));
    assert!(query.contains("acme.com"));

    let context = generator.requests()[0].context.clone().unwrap();
    assert!(context.contains("[1] Acme Corp - Crunchbase"));
    assert!(context.contains("[2] Acme news"));
}

#[tokio::test]
async fn short_context_counts_as_absent() {
    let generator = ScriptedGenerator::new(vec![Ok("From the web: rockets.")]);
    let search = FakeSearch::returning(hits());

    let result = answer(
        "What does Acme do?",
        &profile(Some("Acme. Rockets.")),
        &generator,
        &search,
    )
    .await;

    assert_eq!(result.source, AnswerSource::WebSearch);
    assert_eq!(search.calls(), 1);
    assert_eq!(generator.requests().len(), 1);
}

#[tokio::test]
async fn flagged_reply_falls_back_to_search() {
    let generator = ScriptedGenerator::new(vec![
        Ok(flagged_reply().as_str()),
        Ok("Web search shows Acme hired a new CEO."),
    ]);
    let search = FakeSearch::returning(hits());

    let result = answer("Who is the CEO?", &profile(Some(FOUNDING)), &generator, &search).await;

    assert_eq!(result.source, AnswerSource::WebSearch);
    assert_eq!(result.answer, "Web search shows Acme hired a new CEO.");
    assert_eq!(search.calls(), 1);
}

#[tokio::test]
async fn curly_apostrophe_marker_is_detected() {
    let generator = ScriptedGenerator::new(vec![
        Ok("I don\u{2019}t have enough information in the provided context."),
        Ok("The CEO is Jane Doe (web search)."),
    ]);
    let search = FakeSearch::returning(hits());

    let result = answer("Who is the CEO?", &profile(Some(FOUNDING)), &generator, &search).await;

    assert_eq!(result.source, AnswerSource::WebSearch);
}

#[tokio::test]
async fn failed_context_call_falls_back_to_search() {
    let generator = ScriptedGenerator::new(vec![
        Err(GenerationError::Timeout),
        Ok("Acme was founded in 2001 according to web sources."),
    ]);
    let search = FakeSearch::returning(hits());

    let result = answer(
        "When was Acme founded?",
        &profile(Some(FOUNDING)),
        &generator,
        &search,
    )
    .await;

    assert_eq!(result.source, AnswerSource::WebSearch);
    assert_eq!(search.calls(), 1);
}

#[tokio::test]
async fn partial_context_answer_becomes_hybrid() {
    let partial = "Acme was founded in 2001 in Austin by rocket engineers.";
    let generator = ScriptedGenerator::new(vec![
        Ok(format!("{partial} {INSUFFICIENCY_MARKER} about its funding.").as_str()),
        Ok("Founded in 2001, Acme raised $40M in 2023 (crunchbase.com)."),
    ]);
    let search = FakeSearch::returning(hits());

    let result = answer(
        "Tell me about Acme's history and funding.",
        &profile(Some(FOUNDING)),
        &generator,
        &search,
    )
    .await;

    assert_eq!(result.source, AnswerSource::Hybrid);
    assert_eq!(result.citations.len(), 2);
    let second_prompt = &generator.requests()[1].prompt;
    assert!(second_prompt.contains(partial));
}

// ---------------------------------------------------------------------------
// Degradations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_context_and_empty_search_is_unavailable() {
    let generator = ScriptedGenerator::new(vec![]);
    let search = FakeSearch::returning(Vec::new());

    let result = answer("Who is the CEO?", &profile(None), &generator, &search).await;

    assert_eq!(result.source, AnswerSource::Unavailable);
    assert!(!result.answer.is_empty());
    assert!(result.citations.is_empty());
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn no_context_and_failed_search_is_unavailable() {
    let generator = ScriptedGenerator::new(vec![]);
    let search = FakeSearch::failing();

    let result = answer("Who is the CEO?", &profile(None), &generator, &search).await;

    assert_eq!(result.source, AnswerSource::Unavailable);
    assert!(result.answer.contains("unavailable"));
}

#[tokio::test]
async fn failed_search_keeps_flagged_context_reply() {
    let generator = ScriptedGenerator::new(vec![Ok(flagged_reply().as_str())]);
    let search = FakeSearch::failing();

    let result = answer("Who is the CEO?", &profile(Some(FOUNDING)), &generator, &search).await;

    assert_eq!(result.source, AnswerSource::Context);
    assert_eq!(result.answer, flagged_reply());
}

#[tokio::test]
async fn failed_search_generation_lists_snippets() {
    let generator = ScriptedGenerator::new(vec![Err(GenerationError::Quota("429".to_string()))]);
    let search = FakeSearch::returning(hits());

    let result = answer("How much did Acme raise?", &profile(None), &generator, &search).await;

    assert_eq!(result.source, AnswerSource::WebSearch);
    assert!(result.answer.contains("Acme Corp raised $40M in 2023."));
    assert!(result
        .answer
        .contains("https://www.crunchbase.com/organization/acme"));
    assert_eq!(result.citations.len(), 2);
}

#[tokio::test]
async fn failed_search_generation_keeps_partial_context() {
    let partial = "Acme was founded in 2001 in Austin by rocket engineers.";
    let generator = ScriptedGenerator::new(vec![
        Ok(format!("{partial} {INSUFFICIENCY_MARKER}.").as_str()),
        Ok("   "),
    ]);
    let search = FakeSearch::returning(hits());

    let result = answer("History and funding?", &profile(Some(FOUNDING)), &generator, &search).await;

    assert_eq!(result.source, AnswerSource::Context);
    assert_eq!(result.answer, partial);
}

// ---------------------------------------------------------------------------
// Marker helpers
// ---------------------------------------------------------------------------

#[test]
fn marker_detection_is_case_insensitive() {
    assert!(is_insufficient(
        "i DON'T HAVE ENOUGH INFORMATION in the provided context."
    ));
    assert!(is_insufficient("The context does not mention a CEO."));
    assert!(!is_insufficient("Acme was founded in 2001."));
}

#[test]
fn strip_marker_sentences_keeps_other_sentences() {
    let reply = format!("Acme is based in Austin. {INSUFFICIENCY_MARKER}. It builds rockets!");
    assert_eq!(
        strip_marker_sentences(&reply),
        "Acme is based in Austin. It builds rockets!"
    );
}

#[test]
fn split_sentences_handles_decimals_and_newlines() {
    assert_eq!(
        split_sentences("Revenue was $1.5M. Growth\nis strong"),
        vec!["Revenue was $1.5M.", "Growth", "is strong"]
    );
}
