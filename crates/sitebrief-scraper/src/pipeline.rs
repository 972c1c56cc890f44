//! Fetch-discover-fetch-extract orchestration for one site.

use std::time::Instant;

use chrono::Utc;
use reqwest::Url;
use sitebrief_core::{CompanyProfile, PageRole};

use crate::error::ScraperError;
use crate::extract::{extract, FetchedPage};
use crate::fetch::PageFetcher;
use crate::links::{discover, DiscoveredLinks};
use crate::urls::normalize_url;

/// Analyzes one site: fetches the homepage, discovers and fetches the About
/// and Contact pages (sequentially, in that order), then merges everything
/// into a profile without a summary.
///
/// Page failures are recorded in the profile's `pages_fetched` and never
/// abort the run.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] when `url` cannot be normalized into
/// an http(s) URL.
pub async fn analyze_site(
    fetcher: &PageFetcher,
    url: &str,
    about_text_budget: usize,
) -> Result<CompanyProfile, ScraperError> {
    let site_url = normalize_url(url)?;
    let started = Instant::now();

    tracing::info!(url = %site_url, "analyzing site");

    let home = fetcher.fetch(site_url.as_str()).await;
    let home = FetchedPage::from_fetch(PageRole::Home, home);

    let links = match home.body.as_deref() {
        Some(body) if home.status.is_success() => {
            let base = Url::parse(&home.url).unwrap_or_else(|_| site_url.clone());
            discover(body, &base)
        }
        _ => {
            tracing::warn!(url = %site_url, status = %home.status, "homepage unavailable; skipping link discovery");
            DiscoveredLinks::default()
        }
    };

    let mut pages = vec![home];
    let targets = [
        (PageRole::About, links.about_url),
        (PageRole::Contact, links.contact_url),
    ];
    for (role, target) in targets {
        let Some(target) = target else {
            tracing::debug!(role = %role, "no candidate page found");
            continue;
        };
        let fetched = fetcher.fetch(target.as_str()).await;
        pages.push(FetchedPage::from_fetch(role, fetched));
    }

    let profile = extract(site_url.as_str(), &pages, about_text_budget);
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::info!(
        url = %site_url,
        pages = pages.len(),
        emails = profile.emails().len(),
        social_links = profile.social_links().len(),
        elapsed_ms,
        "site analysis complete"
    );

    Ok(profile.with_timing(Utc::now(), elapsed_ms))
}
