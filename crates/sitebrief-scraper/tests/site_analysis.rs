//! Integration tests for `PageFetcher` and `analyze_site`.
//!
//! Each test stands up a `wiremock` server playing the company site, so no
//! real network traffic is made.

use std::time::Duration;

use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitebrief_core::{FetchStatus, PageRole, SocialPlatform};
use sitebrief_scraper::{analyze_site, PageFetcher, ScraperError};

fn test_fetcher() -> PageFetcher {
    PageFetcher::new(5, "sitebrief-test/0.1").expect("failed to build test PageFetcher")
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

const HOME: &str = r#"<html><head><title>Acme Corp - Reusable Rockets</title></head>
<body>
  <nav>
    <a href="/about">About Us</a>
    <a href="/contact">Contact</a>
    <a href="/blog">Blog</a>
  </nav>
  <p>Launch with Acme.</p>
  <footer><a href="https://www.linkedin.com/company/acme">LinkedIn</a></footer>
</body></html>"#;

const ABOUT: &str = r#"<html><body>
  <nav>Menu</nav>
  <p>Acme Corp was founded in 2001 in Austin.</p>
  <a href="https://twitter.com/acme">Twitter</a>
</body></html>"#;

const CONTACT: &str = r#"<html><body>
  <p>Write to hello@acme.com or call us.</p>
  <a href="mailto:press@acme.com?subject=Hi">Press</a>
</body></html>"#;

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_body_and_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_exists("user-agent"))
        .respond_with(html("<p>hi</p>"))
        .mount(&server)
        .await;

    let fetch = test_fetcher().fetch(&server.uri()).await;

    assert_eq!(fetch.status, FetchStatus::Success);
    assert_eq!(fetch.body.as_deref(), Some("<p>hi</p>"));
}

#[tokio::test]
async fn fetch_keeps_body_of_error_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone, try help@acme.com"))
        .mount(&server)
        .await;

    let fetch = test_fetcher()
        .fetch(&format!("{}/missing", server.uri()))
        .await;

    assert_eq!(fetch.status, FetchStatus::HttpError { code: 404 });
    assert_eq!(fetch.body.as_deref(), Some("gone, try help@acme.com"));
}

#[tokio::test]
async fn fetch_reports_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("slow").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(1, "sitebrief-test/0.1").expect("failed to build fetcher");
    let fetch = fetcher.fetch(&server.uri()).await;

    assert_eq!(fetch.status, FetchStatus::Timeout);
    assert!(fetch.body.is_none());
}

#[tokio::test]
async fn fetch_reports_invalid_url_without_request() {
    let fetch = test_fetcher().fetch("ftp://acme.com/files").await;

    assert!(
        matches!(fetch.status, FetchStatus::NetworkError { ref reason } if reason.contains("ftp")),
        "expected NetworkError, got: {:?}",
        fetch.status
    );
    assert!(fetch.body.is_none());
}

#[tokio::test]
async fn fetch_reports_final_url_after_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("moved"))
        .mount(&server)
        .await;

    let fetch = test_fetcher().fetch(&format!("{}/old", server.uri())).await;

    assert_eq!(fetch.status, FetchStatus::Success);
    assert_eq!(fetch.final_url, format!("{}/new", server.uri()));
}

// ---------------------------------------------------------------------------
// analyze_site
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_site_merges_home_about_and_contact() {
    let server = MockServer::start().await;
    for (route, body) in [("/", HOME), ("/about", ABOUT), ("/contact", CONTACT)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html(body))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(html("blog"))
        .expect(0)
        .mount(&server)
        .await;

    let profile = analyze_site(&test_fetcher(), &server.uri(), 4000)
        .await
        .expect("analysis should succeed");

    assert_eq!(profile.title(), Some("Acme Corp - Reusable Rockets"));
    assert_eq!(profile.display_name(), "Acme Corp");
    assert_eq!(
        profile.about_text(),
        Some("Acme Corp was founded in 2001 in Austin. Twitter")
    );

    let emails: Vec<&str> = profile.emails().iter().map(String::as_str).collect();
    assert_eq!(emails, vec!["hello@acme.com", "press@acme.com"]);

    let socials = profile.social_links();
    assert_eq!(
        socials.get(&SocialPlatform::Linkedin).map(String::as_str),
        Some("https://www.linkedin.com/company/acme")
    );
    assert_eq!(
        socials.get(&SocialPlatform::Twitter).map(String::as_str),
        Some("https://twitter.com/acme")
    );

    let roles: Vec<PageRole> = profile.pages_fetched().iter().map(|p| p.role).collect();
    assert_eq!(roles, vec![PageRole::Home, PageRole::About, PageRole::Contact]);
    assert!(profile
        .pages_fetched()
        .iter()
        .all(|p| p.fetch_status.is_success()));
    assert!(profile.analyzed_at().is_some());
    assert!(profile.summary().is_none());
}

#[tokio::test]
async fn analyze_site_records_failed_about_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<body><a href="/about">About</a><p>We build rockets for small satellites.</p></body>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let profile = analyze_site(&test_fetcher(), &server.uri(), 4000)
        .await
        .expect("page failures must not abort analysis");

    let pages = profile.pages_fetched();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].role, PageRole::About);
    assert_eq!(pages[1].fetch_status, FetchStatus::HttpError { code: 500 });
    assert_eq!(
        profile.about_text(),
        Some("About We build rockets for small satellites.")
    );
}

#[tokio::test]
async fn analyze_site_survives_unreachable_homepage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let profile = analyze_site(&test_fetcher(), &server.uri(), 4000)
        .await
        .expect("homepage failure is recorded, not raised");

    assert_eq!(profile.pages_fetched().len(), 1);
    assert_eq!(
        profile.pages_fetched()[0].fetch_status,
        FetchStatus::HttpError { code: 503 }
    );
    assert!(profile.about_text().is_none());
}

#[tokio::test]
async fn analyze_site_rejects_unusable_url() {
    let err = analyze_site(&test_fetcher(), "ftp://acme.com", 4000)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidUrl { .. }),
        "expected InvalidUrl, got: {err:?}"
    );
}
