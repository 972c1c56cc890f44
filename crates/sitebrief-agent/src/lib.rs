//! AI layer over a scraped company profile: one-shot summaries and a
//! context-first question router that falls back to web search.

pub mod analyst;
pub mod error;
pub mod gemini;
pub mod router;
pub mod summarize;
pub mod tavily;
pub mod traits;

pub use analyst::Analyst;
pub use error::{AgentError, GenerationError, SearchError, SummaryUnavailable};
pub use gemini::GeminiClient;
pub use router::answer;
pub use summarize::summarize;
pub use tavily::TavilyClient;
pub use traits::{GenerationRequest, SearchHit, SearchService, TextGenerator};
