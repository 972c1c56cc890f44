//! Deterministic company-site scraping: fetch the homepage, discover the
//! About and Contact pages, and merge what each page yields into a single
//! [`sitebrief_core::CompanyProfile`].

pub mod error;
pub mod extract;
pub mod fetch;
pub mod links;
pub mod pipeline;
pub mod urls;

mod emails;
mod html;
mod social;

pub use error::ScraperError;
pub use extract::{extract, extract_page, FetchedPage, PageExtraction};
pub use fetch::{PageFetch, PageFetcher};
pub use html::truncate_at_word_boundary;
pub use links::{discover, DiscoveredLinks};
pub use pipeline::analyze_site;
pub use urls::normalize_url;
