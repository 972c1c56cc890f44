//! Field extraction: per-page parsing plus a first-wins merge into a
//! [`CompanyProfile`]. Pure; no I/O.

use std::collections::{BTreeMap, BTreeSet};

use reqwest::Url;
use scraper::Html;
use sitebrief_core::{
    CompanyProfile, FetchStatus, PageRecord, PageRole, ProfileParts, SocialPlatform,
};

use crate::emails::{emails_from_mailto, emails_in_text};
use crate::fetch::PageFetch;
use crate::html::{
    document_title, main_text, truncate_at_word_boundary, visible_text, ANCHOR, BODY,
};
use crate::social::classify_social;
use crate::urls::resolve_link;

/// One page handed to the extractor.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub role: PageRole,
    /// Final URL of the page; relative links resolve against it.
    pub url: String,
    pub status: FetchStatus,
    pub body: Option<String>,
}

impl FetchedPage {
    #[must_use]
    pub fn from_fetch(role: PageRole, fetch: PageFetch) -> Self {
        Self {
            role,
            url: fetch.final_url,
            status: fetch.status,
            body: fetch.body,
        }
    }
}

/// Everything one page contributes before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtraction {
    pub role: PageRole,
    pub title: Option<String>,
    pub emails: Vec<String>,
    /// In document order; duplicates per platform are resolved by the merge.
    pub social_links: Vec<(SocialPlatform, String)>,
    pub main_text: Option<String>,
}

/// Parses one page.
///
/// Emails and social links are mined from any body, including error pages.
/// Title and main text come only from successfully fetched pages.
#[must_use]
pub fn extract_page(page: &FetchedPage) -> PageExtraction {
    let mut extraction = PageExtraction {
        role: page.role,
        title: None,
        emails: Vec::new(),
        social_links: Vec::new(),
        main_text: None,
    };

    let Some(body) = page.body.as_deref() else {
        tracing::debug!(role = %page.role, url = %page.url, status = %page.status, "no body to extract");
        return extraction;
    };

    let document = Html::parse_document(body);
    let base = Url::parse(&page.url).ok();

    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());
    extraction.emails = emails_in_text(&visible_text(root));

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let mailto = emails_from_mailto(href);
        if !mailto.is_empty() {
            extraction.emails.extend(mailto);
            continue;
        }

        let target = match &base {
            Some(base) => resolve_link(base, href),
            None => Url::parse(href.trim()).ok(),
        };
        if let Some(target) = target {
            if let Some(platform) = classify_social(&target) {
                extraction.social_links.push((platform, target.to_string()));
            }
        }
    }

    if page.status.is_success() {
        extraction.title = document_title(&document);
        extraction.main_text = main_text(&document);
    }

    extraction
}

/// Accumulated profile fields; each page is folded in with first-wins
/// precedence.
#[derive(Debug, Default)]
struct Merged {
    title: Option<String>,
    emails: BTreeSet<String>,
    social_links: BTreeMap<SocialPlatform, String>,
    home_text: Option<String>,
    about_text: Option<String>,
}

impl Merged {
    fn merge(mut self, page: PageExtraction) -> Self {
        if page.role == PageRole::Home && self.title.is_none() {
            self.title = page.title;
        }

        self.emails.extend(page.emails);

        for (platform, url) in page.social_links {
            self.social_links.entry(platform).or_insert(url);
        }

        match page.role {
            PageRole::Home if self.home_text.is_none() => self.home_text = page.main_text,
            PageRole::About if self.about_text.is_none() => self.about_text = page.main_text,
            _ => {}
        }

        self
    }
}

/// Builds a profile from the fetched pages.
///
/// Pages are merged home, about, contact regardless of input order. The
/// about text prefers the About page and falls back to the homepage, and is
/// truncated to `about_text_budget` characters at a word boundary.
#[must_use]
pub fn extract(site_url: &str, pages: &[FetchedPage], about_text_budget: usize) -> CompanyProfile {
    let mut ordered: Vec<&FetchedPage> = pages.iter().collect();
    ordered.sort_by_key(|page| page.role);

    let merged = ordered
        .into_iter()
        .map(extract_page)
        .fold(Merged::default(), Merged::merge);

    let about_text = merged
        .about_text
        .or(merged.home_text)
        .and_then(|text| truncate_at_word_boundary(&text, about_text_budget));

    let pages_fetched = pages
        .iter()
        .map(|page| PageRecord {
            role: page.role,
            url: page.url.clone(),
            fetch_status: page.status.clone(),
        })
        .collect();

    CompanyProfile::from_parts(ProfileParts {
        url: site_url.to_string(),
        title: merged.title,
        emails: merged.emails,
        social_links: merged.social_links,
        about_text,
        pages_fetched,
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
