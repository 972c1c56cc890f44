//! Social-profile link recognition.

use reqwest::Url;
use sitebrief_core::SocialPlatform;

struct SocialPattern {
    platform: SocialPlatform,
    domains: &'static [&'static str],
}

const SOCIAL_PATTERNS: [SocialPattern; 5] = [
    SocialPattern {
        platform: SocialPlatform::Linkedin,
        domains: &["linkedin.com"],
    },
    SocialPattern {
        platform: SocialPlatform::Facebook,
        domains: &["facebook.com"],
    },
    SocialPattern {
        platform: SocialPlatform::Twitter,
        domains: &["twitter.com", "x.com"],
    },
    SocialPattern {
        platform: SocialPlatform::Instagram,
        domains: &["instagram.com"],
    },
    SocialPattern {
        platform: SocialPlatform::Youtube,
        domains: &["youtube.com", "youtu.be"],
    },
];

/// Path segments that mark share widgets, login walls and individual posts.
const IGNORED_PATH_SEGMENTS: [&str; 10] = [
    "share", "intent", "addtoany", "login", "post", "status", "jobs", "careers", "legal", "privacy",
];

/// Segments that mark a deeper path as an account page.
const PROFILE_PATH_MARKERS: [&str; 4] = ["company", "in", "user", "channel"];

/// Platform of an outbound profile link, or `None` for anything that is not
/// a company profile on a known network.
pub(crate) fn classify_social(url: &Url) -> Option<SocialPlatform> {
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(&host);

    let platform = SOCIAL_PATTERNS
        .iter()
        .find(|pattern| {
            pattern
                .domains
                .iter()
                .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
        })?
        .platform;

    let segments: Vec<String> = url
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(str::to_ascii_lowercase)
                .collect()
        })
        .unwrap_or_default();

    if segments.is_empty() {
        return None;
    }
    if segments
        .iter()
        .any(|s| IGNORED_PATH_SEGMENTS.contains(&s.as_str()))
    {
        return None;
    }
    let profile_like = segments.len() <= 2
        || segments
            .iter()
            .any(|s| PROFILE_PATH_MARKERS.contains(&s.as_str()));

    profile_like.then_some(platform)
}
