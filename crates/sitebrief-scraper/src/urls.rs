//! URL normalization, link resolution, and same-site checks.

use std::net::IpAddr;

use reqwest::Url;

use crate::ScraperError;

/// Second-level labels that act as public suffixes under a two-letter
/// country TLD (`acme.co.uk`, `acme.com.au`).
const COMMON_SECOND_LEVEL_SUFFIXES: [&str; 7] = ["co", "com", "org", "net", "ac", "gov", "edu"];

/// Normalizes user input into a fetchable URL.
///
/// Adds `https://` when no scheme is present and strips any fragment.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] for empty input, unparseable URLs,
/// non-http(s) schemes, or URLs without a host.
pub fn normalize_url(raw: &str) -> Result<Url, ScraperError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ScraperError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("URL is empty".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let mut url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("URL has no host".to_string()));
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolves an `href` against the page it appeared on.
///
/// Returns `None` for empty hrefs, unresolvable targets, and non-http(s)
/// schemes. The fragment is dropped.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

/// Approximates the registered domain of a host: the last two labels, or
/// the last three under a `co.uk`-style suffix. `www.` is ignored and IP
/// addresses are returned unchanged.
#[must_use]
pub fn registered_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host.parse::<IpAddr>().is_ok() || host.starts_with('[') {
        return host;
    }
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    let n = labels.len();
    if n <= 2 {
        return labels.join(".");
    }

    let tld = labels[n - 1];
    let second = labels[n - 2];
    let keep = if tld.len() == 2 && COMMON_SECOND_LEVEL_SUFFIXES.contains(&second) {
        3
    } else {
        2
    };
    labels[n - keep..].join(".")
}

/// True when both URLs share a registered domain.
#[must_use]
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => registered_domain(ha) == registered_domain(hb),
        _ => false,
    }
}

/// Compares two URLs ignoring a trailing slash on the path.
pub(crate) fn same_page(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
        && a.path().trim_end_matches('/') == b.path().trim_end_matches('/')
        && a.query() == b.query()
}
