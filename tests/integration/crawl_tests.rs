//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small encyclopedia and run the full
//! coordinator/worker cycle end-to-end against it.

use std::sync::Arc;
use tempfile::TempDir;
use wiki_relay::config::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use wiki_relay::crawler::{crawl, run_crawl, HttpFetcher};
use wiki_relay::output::MemoryArtifactSink;
use wiki_relay::site::Site;
use wiki_relay::CrawlError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEED_PAGE: &str = r#"<html><head><title>Seed</title></head><body>
<div id="nav"><a href="/wiki/Main_Page">Main page</a></div>
<p>The seed links to <a href="/wiki/Alpha">Alpha</a>, shows
<a href="/wiki/File:Seed.png">a picture</a>, cites
<a href="https://example.org/source">a source</a> and
<a href="/wiki/Beta">Beta</a>.</p>
<table class="navbox"><tr><td><a href="/wiki/Navbox_Entry">entry</a></td></tr></table>
<p>More about <a href="/wiki/Gamma">Gamma</a>.</p>
</body></html>"#;

const ALPHA_PAGE: &str = r##"<html><body>
<div class="hatnote">Not this</div>
<p><b>Alpha</b> is the first letter<sup class="reference"><a href="#cite-1">[1]</a></sup>
of the <a href="/wiki/Greek_alphabet">Greek alphabet</a>.</p>
<p>Pronounced <span class="IPA"><i>al-fa</i></span> &amp; written Α.</p>
</body></html>"##;

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, workers: u32, output: &TempDir) -> Config {
    Config {
        crawler: CrawlerConfig {
            workers,
            articles: None,
        },
        site: SiteConfig {
            base_url: format!("{}/", base_url),
            seed_path: "wiki/Seed".to_string(),
        },
        output: OutputConfig {
            directory: output.path().display().to_string(),
        },
        ..Config::default()
    }
}

async fn mount_page(server: &MockServer, page: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_writes_artifacts() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/wiki/Seed", 200, SEED_PAGE).await;
    mount_page(&mock_server, "/wiki/Alpha", 200, ALPHA_PAGE).await;
    mount_page(&mock_server, "/wiki/Beta", 404, "<p>gone</p>").await;

    let output = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), 2, &output);

    let summary = run_crawl(&config, 2).await.expect("Crawl failed");

    assert_eq!(summary.requested, 2);
    assert_eq!(summary.issued, 2);
    assert_eq!(summary.workers.len(), 2);
    assert_eq!(summary.artifacts_written(), 2);
    assert_eq!(summary.fetch_failures(), 1);

    let alpha = std::fs::read_to_string(output.path().join("wiki/Alpha.txt"))
        .expect("Alpha artifact missing");
    assert_eq!(
        alpha,
        "Alpha is the first letter\nof the Greek alphabet.Pronounced al-fa  written Α."
    );

    // A failed fetch still leaves an empty artifact
    let beta = std::fs::read_to_string(output.path().join("wiki/Beta.txt"))
        .expect("Beta artifact missing");
    assert_eq!(beta, "");

    // Chrome, file, external and navbox links are never crawled
    assert!(!output.path().join("wiki/Main_Page.txt").exists());
    assert!(!output.path().join("wiki/Navbox_Entry.txt").exists());
    assert!(!output.path().join("wiki/Gamma.txt").exists());
}

#[tokio::test]
async fn test_quota_is_exact_across_workers() {
    let mock_server = MockServer::start().await;

    let mut seed = String::from("<p>Index:");
    for n in 0..12 {
        seed.push_str(&format!(r#" <a href="/wiki/File:P{n}.jpg">p</a>"#));
        seed.push_str(&format!(r#" <a href="/wiki/Topic_{n}">t</a>"#));
    }
    seed.push_str("</p>");
    mount_page(&mock_server, "/wiki/Seed", 200, &seed).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Topic text.</p>"))
        .mount(&mock_server)
        .await;

    let output = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), 4, &output);
    let site = Site::from_config(&config.site).expect("Invalid site");
    let fetcher = Arc::new(HttpFetcher::from_config(&config).expect("Client build failed"));
    let sink = Arc::new(MemoryArtifactSink::new());

    let summary = crawl(site, 7, 4, fetcher, sink.clone())
        .await
        .expect("Crawl failed");

    assert_eq!(summary.issued, 7);
    assert_eq!(summary.workers.len(), 4);
    assert_eq!(summary.workers.iter().map(|w| w.assigned).sum::<u32>(), 7);

    let expected: Vec<String> = (0..7).map(|n| format!("wiki/Topic_{n}")).collect();
    let mut names = sink.names();
    names.sort_by_key(|name| name.trim_start_matches("wiki/Topic_").parse::<u32>().unwrap());
    assert_eq!(names, expected);
    assert_eq!(sink.get("wiki/Topic_3").as_deref(), Some("Topic text."));
}

#[tokio::test]
async fn test_redirected_article_is_followed() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/wiki/Seed",
        200,
        r#"<p><a href="/wiki/Old_Name">old</a></p>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Old_Name"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/wiki/New_Name"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/wiki/New_Name", 200, "<p>Moved here.</p>").await;

    let output = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), 1, &output);

    let summary = run_crawl(&config, 1).await.expect("Crawl failed");
    assert_eq!(summary.fetch_failures(), 0);

    let text = std::fs::read_to_string(output.path().join("wiki/Old_Name.txt"))
        .expect("Artifact missing");
    assert_eq!(text, "Moved here.");
}

#[tokio::test]
async fn test_seed_unavailable_fails_before_dispatch() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/wiki/Seed", 500, "oops").await;

    let output = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), 2, &output);

    let result = run_crawl(&config, 3).await;
    assert!(matches!(result, Err(CrawlError::SeedUnavailable { .. })));
    assert!(!output.path().join("wiki").exists());
}

#[tokio::test]
async fn test_seed_exhaustion_reports_shortfall() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/wiki/Seed",
        200,
        r#"<p>Only <a href="/wiki/Lonely">one</a> link.</p>"#,
    )
    .await;
    mount_page(&mock_server, "/wiki/Lonely", 200, "<p>Alone.</p>").await;

    let output = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&mock_server.uri(), 3, &output);

    let result = run_crawl(&config, 4).await;
    assert!(matches!(
        result,
        Err(CrawlError::SeedExhausted {
            issued: 1,
            requested: 4
        })
    ));

    // The link that was issued is still crawled before the workers exit
    let text = std::fs::read_to_string(output.path().join("wiki/Lonely.txt"))
        .expect("Artifact missing");
    assert_eq!(text, "Alone.");
}
