//! The company profile snapshot produced by one analysis pass.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which part of the site a fetched page plays in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageRole {
    Home,
    About,
    Contact,
}

impl std::fmt::Display for PageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            PageRole::Home => "home",
            PageRole::About => "about",
            PageRole::Contact => "contact",
        })
    }
}

/// Social platforms recognized by the extractor. Ordering follows
/// declaration order so that `BTreeMap` iteration is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Linkedin,
    Facebook,
    Twitter,
    Instagram,
    Youtube,
}

impl SocialPlatform {
    /// Every platform, in sort order.
    pub const ALL: [SocialPlatform; 5] = [
        SocialPlatform::Linkedin,
        SocialPlatform::Facebook,
        SocialPlatform::Twitter,
        SocialPlatform::Instagram,
        SocialPlatform::Youtube,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Youtube => "youtube",
        }
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of a single page fetch. Failures are recorded, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchStatus {
    Success,
    Timeout,
    HttpError { code: u16 },
    NetworkError { reason: String },
}

impl FetchStatus {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, FetchStatus::Success)
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStatus::Success => write!(f, "ok"),
            FetchStatus::Timeout => write!(f, "timeout"),
            FetchStatus::HttpError { code } => write!(f, "http {code}"),
            FetchStatus::NetworkError { reason } => write!(f, "network error: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub role: PageRole,
    pub url: String,
    pub fetch_status: FetchStatus,
}

/// Field values handed to [`CompanyProfile::from_parts`].
#[derive(Debug, Clone, Default)]
pub struct ProfileParts {
    pub url: String,
    pub title: Option<String>,
    pub emails: BTreeSet<String>,
    pub social_links: BTreeMap<SocialPlatform, String>,
    pub about_text: Option<String>,
    pub pages_fetched: Vec<PageRecord>,
}

/// Structured snapshot of a company's public web presence.
///
/// Built once per analysis and read-only afterwards; the only mutation is
/// [`CompanyProfile::set_summary`], which succeeds at most once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyProfile {
    url: String,
    title: Option<String>,
    emails: BTreeSet<String>,
    social_links: BTreeMap<SocialPlatform, String>,
    about_text: Option<String>,
    summary: Option<String>,
    pages_fetched: Vec<PageRecord>,
    analyzed_at: Option<DateTime<Utc>>,
    elapsed_ms: u64,
}

const GENERIC_TITLE_PARTS: [&str; 6] = [
    "home",
    "welcome",
    "official site",
    "website",
    "log in",
    "login",
];

const TITLE_SEPARATORS: [&str; 4] = [" | ", " – ", " - ", " : "];

const NAME_SUFFIXES: [&str; 11] = [
    " Inc.",
    " LLC",
    " Ltd.",
    " Corp.",
    " Corporation",
    " Limited",
    " GmbH",
    " PLC",
    ".com",
    ".org",
    ".net",
];

impl CompanyProfile {
    /// Assembles a profile. Blank titles and blank about text become absent
    /// and present values are trimmed.
    #[must_use]
    pub fn from_parts(parts: ProfileParts) -> Self {
        Self {
            url: parts.url,
            title: non_blank(parts.title),
            emails: parts.emails,
            social_links: parts.social_links,
            about_text: non_blank(parts.about_text),
            summary: None,
            pages_fetched: parts.pages_fetched,
            analyzed_at: None,
            elapsed_ms: 0,
        }
    }

    /// Stamps when the analysis ran and how long fetching and extraction took.
    #[must_use]
    pub fn with_timing(mut self, analyzed_at: DateTime<Utc>, elapsed_ms: u64) -> Self {
        self.analyzed_at = Some(analyzed_at);
        self.elapsed_ms = elapsed_ms;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn emails(&self) -> &BTreeSet<String> {
        &self.emails
    }

    #[must_use]
    pub fn social_links(&self) -> &BTreeMap<SocialPlatform, String> {
        &self.social_links
    }

    #[must_use]
    pub fn about_text(&self) -> Option<&str> {
        self.about_text.as_deref()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn pages_fetched(&self) -> &[PageRecord] {
        &self.pages_fetched
    }

    #[must_use]
    pub fn analyzed_at(&self) -> Option<DateTime<Utc>> {
        self.analyzed_at
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Sets the AI summary. Returns `false` (and keeps the existing value)
    /// if a summary was already set or `summary` is blank.
    pub fn set_summary(&mut self, summary: String) -> bool {
        if self.summary.is_some() {
            return false;
        }
        match non_blank(Some(summary)) {
            Some(s) => {
                self.summary = Some(s);
                true
            }
            None => false,
        }
    }

    /// Best-effort human-readable company name.
    ///
    /// Prefers the first significant segment of the page title with legal
    /// suffixes removed; falls back to the host's leading label.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.title.as_deref().and_then(name_from_title) {
            return name;
        }
        name_from_url(&self.url).unwrap_or_else(|| self.url.clone())
    }

    /// Flat field-name to value mapping for row-based export.
    #[must_use]
    pub fn export_row(&self) -> BTreeMap<&'static str, String> {
        let mut row = BTreeMap::new();
        row.insert("url", self.url.clone());
        row.insert("title", self.title.clone().unwrap_or_default());
        row.insert("ai_summary", self.summary.clone().unwrap_or_default());
        row.insert(
            "emails",
            self.emails.iter().cloned().collect::<Vec<_>>().join("; "),
        );
        let mut socials: Vec<&str> = self.social_links.values().map(String::as_str).collect();
        socials.sort_unstable();
        row.insert("social_links", socials.join("; "));
        row.insert(
            "raw_about_text",
            self.about_text.clone().unwrap_or_default(),
        );
        row.insert(
            "pages_fetched",
            self.pages_fetched
                .iter()
                .map(|p| format!("{} {} ({})", p.role, p.url, p.fetch_status))
                .collect::<Vec<_>>()
                .join("; "),
        );
        row.insert(
            "analyzed_at",
            self.analyzed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        );
        row
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn name_from_title(title: &str) -> Option<String> {
    let mut parts: Vec<&str> = vec![title];
    for sep in TITLE_SEPARATORS {
        parts = parts.into_iter().flat_map(|p| p.split(sep)).collect();
    }

    let first = parts.into_iter().map(str::trim).find(|p| {
        !GENERIC_TITLE_PARTS.contains(&p.to_lowercase().as_str()) && p.chars().count() > 3
    })?;

    let mut name = first.to_string();
    loop {
        let before = name.len();
        for suffix in NAME_SUFFIXES {
            if let Some(stripped) = name.strip_suffix(suffix) {
                name = stripped.trim_end().to_string();
            }
        }
        if name.len() == before {
            break;
        }
    }

    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn name_from_url(url: &str) -> Option<String> {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = without_scheme.split(['/', '?', '#']).next()?;
    let host = host.split(':').next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next().filter(|l| !l.is_empty())?;

    let words: Vec<String> = label
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |c| {
                c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            })
        })
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
