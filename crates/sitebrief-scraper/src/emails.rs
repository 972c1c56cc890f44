//! Email address recognition in page text and `mailto:` targets.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
static EMAIL_EXACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("valid exact email regex")
});

const PLACEHOLDER_DOMAINS: [&str; 7] = [
    "example.com",
    "example.org",
    "example.net",
    "domain.com",
    "yourdomain.com",
    "yourcompany.com",
    "email.com",
];

const PLACEHOLDER_LOCALS: [&str; 7] = [
    "name",
    "user",
    "username",
    "you",
    "yourname",
    "your.name",
    "email",
];

/// Retina asset names like `logo@2x.png` match the address pattern.
const ASSET_TLDS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// All plausible addresses in free text, lower-cased.
pub(crate) fn emails_in_text(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .filter_map(|m| normalize_email(m.as_str()))
        .collect()
}

/// Addresses named by a `mailto:` href. Query parameters are ignored and
/// comma-separated recipients are all returned.
pub(crate) fn emails_from_mailto(href: &str) -> Vec<String> {
    let href = href.trim();
    let Some(prefix) = href.get(..7) else {
        return Vec::new();
    };
    if !prefix.eq_ignore_ascii_case("mailto:") {
        return Vec::new();
    }

    let target = href[7..].split('?').next().unwrap_or_default();
    let Ok(decoded) = percent_decode_str(target).decode_utf8() else {
        return Vec::new();
    };

    decoded
        .split(',')
        .map(str::trim)
        .filter(|candidate| EMAIL_EXACT_RE.is_match(candidate))
        .filter_map(normalize_email)
        .collect()
}

/// Lower-cases a candidate and drops placeholders and asset filenames.
pub(crate) fn normalize_email(candidate: &str) -> Option<String> {
    let email = candidate.trim().trim_matches('.').to_lowercase();
    let (local, domain) = email.rsplit_once('@')?;
    if local.is_empty() || domain.is_empty() {
        return None;
    }

    if PLACEHOLDER_DOMAINS.contains(&domain) || PLACEHOLDER_LOCALS.contains(&local) {
        return None;
    }

    let tld = domain.rsplit('.').next().unwrap_or_default();
    if ASSET_TLDS.contains(&tld) {
        return None;
    }

    Some(email)
}
