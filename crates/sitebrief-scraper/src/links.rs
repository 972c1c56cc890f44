//! About/Contact link discovery on a homepage.

use reqwest::Url;
use scraper::Html;

use crate::html::{collapse_whitespace, ANCHOR};
use crate::urls::{resolve_link, same_page, same_site};

/// Link schemes and prefixes that never lead to another page.
const SKIPPED_HREF_PREFIXES: [&str; 4] = ["javascript:", "#", "tel:", "mailto:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkCategory {
    About,
    Contact,
}

/// How one category of page is recognized from an anchor.
struct LinkVocabulary {
    category: LinkCategory,
    /// Phrases matched against the anchor's visible text.
    text_phrases: &'static [&'static str],
    /// Keywords matched against whole path segments.
    path_keywords: &'static [&'static str],
    /// Words that disqualify an href even if it matches otherwise.
    excluded_words: &'static [&'static str],
}

const LINK_VOCABULARY: [LinkVocabulary; 2] = [
    LinkVocabulary {
        category: LinkCategory::About,
        text_phrases: &["about", "company", "who we are"],
        path_keywords: &["about", "company", "who-we-are"],
        excluded_words: &["blog", "news", "press", "careers", "jobs", "events"],
    },
    LinkVocabulary {
        category: LinkCategory::Contact,
        text_phrases: &["contact", "get in touch", "reach us", "support"],
        path_keywords: &["contact", "reach-us", "get-in-touch"],
        excluded_words: &[],
    },
];

/// Candidate pages found on the homepage. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredLinks {
    pub about_url: Option<Url>,
    pub contact_url: Option<Url>,
}

/// Scans `<a href>` elements in document order and returns the first
/// same-site About and Contact candidates.
///
/// Relative links are resolved against `base_url`, which should be the
/// homepage's final URL after redirects.
#[must_use]
pub fn discover(home_html: &str, base_url: &Url) -> DiscoveredLinks {
    let document = Html::parse_document(home_html);
    let mut found = DiscoveredLinks::default();

    for anchor in document.select(&ANCHOR) {
        if found.about_url.is_some() && found.contact_url.is_some() {
            break;
        }

        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        let lowered = href.to_ascii_lowercase();
        if href.is_empty()
            || SKIPPED_HREF_PREFIXES
                .iter()
                .any(|prefix| lowered.starts_with(prefix))
        {
            continue;
        }

        let Some(target) = resolve_link(base_url, href) else {
            continue;
        };
        if !same_site(base_url, &target) || same_page(base_url, &target) {
            continue;
        }

        let text = collapse_whitespace(&anchor.text().collect::<String>()).to_lowercase();

        for vocabulary in &LINK_VOCABULARY {
            let slot = match vocabulary.category {
                LinkCategory::About => &mut found.about_url,
                LinkCategory::Contact => &mut found.contact_url,
            };
            if slot.is_none() && matches_vocabulary(vocabulary, &text, &lowered, &target) {
                tracing::debug!(
                    category = ?vocabulary.category,
                    url = %target,
                    "discovered candidate page"
                );
                *slot = Some(target.clone());
                break;
            }
        }
    }

    found
}

fn matches_vocabulary(vocabulary: &LinkVocabulary, text: &str, href: &str, target: &Url) -> bool {
    if vocabulary
        .excluded_words
        .iter()
        .any(|word| href.contains(word))
    {
        return false;
    }

    let text_hit = vocabulary
        .text_phrases
        .iter()
        .any(|phrase| contains_phrase(text, phrase));
    text_hit
        || vocabulary
            .path_keywords
            .iter()
            .any(|keyword| path_matches(target, keyword))
}

/// Phrase match on word boundaries, so "contact" does not fire on "contactless".
fn contains_phrase(text: &str, phrase: &str) -> bool {
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let phrase: Vec<&str> = phrase.split_whitespace().collect();
    contains_run(&words, &phrase)
}

/// True when some path segment, split on `-`, `_` and `.`, contains the
/// keyword's words contiguously.
fn path_matches(url: &Url, keyword: &str) -> bool {
    let keyword: Vec<&str> = keyword.split('-').collect();
    let Some(segments) = url.path_segments() else {
        return false;
    };
    segments.map(str::to_ascii_lowercase).any(|segment| {
        let words: Vec<&str> = segment
            .split(['-', '_', '.'])
            .filter(|w| !w.is_empty())
            .collect();
        contains_run(&words, &keyword)
    })
}

fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}
