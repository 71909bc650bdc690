//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch → extract → link extraction cycle end-to-end.

use std::time::Duration;
use sumi_sift::config::{Config, DEFAULT_USER_AGENT};
use sumi_sift::crawler::{build_http_client, fetch_url, Crawler, FetchOutcome, HttpFetcher, Mode};
use sumi_sift::output::{to_json, BatchStatistics};
use sumi_sift::CrawlResult;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE_PAGE: &str = r##"<html>
<head><title>Post</title><script>trackVisit();</script></head>
<body>
    <header><a href="/">Site name</a></header>
    <nav>
        <a href="/blog">Blog</a>
        <a href="/contact">Contact</a>
    </nav>
    <main>
        <h1>A post</h1>
        <p>First   paragraph.</p>
        <p>Read <a href="/about">about us</a> or <a href="https://other.com/page">elsewhere</a>.</p>
        <a href="/about">About again</a>
        <a href="#top">Top</a>
        <a href="javascript:void(0)">Click</a>
        <a href="mailto:a@b.com">Mail</a>
    </main>
    <footer>Copyright notice</footer>
</body>
</html>"##;

/// Creates a crawler with no politeness delay
fn test_crawler(config: &Config) -> Crawler<HttpFetcher> {
    let fetcher = HttpFetcher::new(config).expect("Failed to build fetcher");
    Crawler::new(fetcher, Duration::ZERO)
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

/// Returns a local URL nobody is listening on
fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

#[tokio::test]
async fn test_body_only_crawl_of_single_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/blog/post"))
        .respond_with(html(ARTICLE_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&Config::default());
    let url = format!("{}/blog/post", base_url);
    let result = crawler.crawl_url(&url, Mode::BodyOnly).await;

    let page = result.as_success().expect("Expected success");
    assert_eq!(page.url(), url);
    assert_eq!(page.status_code(), 200);
    assert!(page.content_type().starts_with("text/html"));
    assert_eq!(page.encoding(), "utf-8");

    // Main content only, whitespace collapsed
    assert!(page.content().starts_with("A post First paragraph."));
    assert!(!page.content().contains("Site name"));
    assert!(!page.content().contains("Contact"));
    assert!(!page.content().contains("Copyright"));
    assert!(!page.content().contains("trackVisit"));
    assert!(!page.content().contains('\n'));
    assert_eq!(page.content_length(), page.content().chars().count());

    // Links resolved, classified, de-duplicated; nav links stripped with the nav
    assert_eq!(page.links().internal, vec![format!("{}/about", base_url)]);
    assert_eq!(page.links().external, vec!["https://other.com/page".to_string()]);
    assert_eq!(page.total_links_count(), 2);
    assert!(page.links().all.iter().all(|l| !l.contains("mailto") && !l.contains('#')));
}

#[tokio::test]
async fn test_full_page_crawl_keeps_raw_body_and_all_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/blog/post"))
        .respond_with(html(ARTICLE_PAGE))
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&Config::default());
    let result = crawler
        .crawl_url(&format!("{}/blog/post", base_url), Mode::FullPage)
        .await;

    let page = result.as_success().expect("Expected success");
    assert_eq!(page.content(), ARTICLE_PAGE);
    assert_eq!(page.mode(), Mode::FullPage);
    assert_eq!(
        page.links().internal,
        vec![
            format!("{}/", base_url),
            format!("{}/blog", base_url),
            format!("{}/contact", base_url),
            format!("{}/about", base_url),
        ]
    );
    assert_eq!(page.external_links_count(), 1);
    assert_eq!(page.total_links_count(), 5);
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(html("<p>ok</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&Config::default());
    let result = crawler
        .crawl_url(&format!("{}/", mock_server.uri()), Mode::BodyOnly)
        .await;

    assert!(result.is_success(), "unexpected failure: {:?}", result.error());
}

#[tokio::test]
async fn test_custom_user_agent_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "SiftTest/2.0"))
        .respond_with(html("<p>ok</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.user_agent.value = "SiftTest/2.0".to_string();

    let result = test_crawler(&config)
        .crawl_url(&mock_server.uri(), Mode::BodyOnly)
        .await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_http_error_status_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&Config::default());

    let missing = crawler
        .crawl_url(&format!("{}/missing", mock_server.uri()), Mode::BodyOnly)
        .await;
    let error = missing.error().expect("Expected failure");
    assert!(error.contains("404"), "got: {}", error);
    assert!(error.contains("Not Found"), "got: {}", error);

    let broken = crawler
        .crawl_url(&format!("{}/broken", mock_server.uri()), Mode::BodyOnly)
        .await;
    let error = broken.error().expect("Expected failure");
    assert!(error.contains("503"), "got: {}", error);
}

#[tokio::test]
async fn test_unreachable_host_is_connect_failure() {
    let client = build_http_client(&Config::default()).expect("Failed to build client");
    let url = unreachable_url();

    match fetch_url(&client, &url).await {
        FetchOutcome::Failure { error } => {
            assert!(error.is_transport());
            assert!(error.to_string().contains("Connection failed"), "got: {}", error);
        }
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html("<p>late</p>").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.crawler.timeout_secs = 1;

    let result = test_crawler(&config)
        .crawl_url(&mock_server.uri(), Mode::BodyOnly)
        .await;
    let error = result.error().expect("Expected failure");
    assert!(error.contains("timeout"), "got: {}", error);
}

#[tokio::test]
async fn test_batch_with_middle_failure_preserves_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(html("<main>One</main>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/three"))
        .respond_with(html("<main>Three</main>"))
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/one", base_url),
        "   ".to_string(),
        unreachable_url(),
        String::new(),
        format!("  {}/three  ", base_url),
    ];

    let crawler = test_crawler(&Config::default());
    let results = crawler.crawl_many(&urls, Mode::BodyOnly).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_success());
    assert!(!results[1].is_success());
    assert!(results[2].is_success());
    assert_eq!(results[0].as_success().unwrap().content(), "One");
    assert_eq!(results[2].url(), format!("{}/three", base_url));
    assert_eq!(results[2].as_success().unwrap().content(), "Three");

    let stats = BatchStatistics::from_results(&results);
    assert_eq!(stats.successful, 2);
    assert_eq!(stats.failed, 1);
}

#[tokio::test]
async fn test_missing_scheme_uses_https() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html("<p>plain http only</p>"))
        .mount(&mock_server)
        .await;

    // The mock server speaks plain HTTP, so the HTTPS attempt fails
    let address = mock_server.address().to_string();
    let result = test_crawler(&Config::default())
        .crawl_url(&address, Mode::BodyOnly)
        .await;

    assert_eq!(result.url(), format!("https://{}", address));
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_declared_charset_used_for_decoding() {
    let mock_server = MockServer::start().await;

    let body: Vec<u8> = b"<html><body><main>Caf\xe9</main></body></html>".to_vec();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1"))
        .mount(&mock_server)
        .await;

    let result = test_crawler(&Config::default())
        .crawl_url(&mock_server.uri(), Mode::BodyOnly)
        .await;

    let page = result.as_success().expect("Expected success");
    assert_eq!(page.encoding(), "iso-8859-1");
    assert_eq!(page.content(), "Café");
}

#[tokio::test]
async fn test_plain_text_body_extracted_like_html() {
    let mock_server = MockServer::start().await;
    let body = "line one\n\n   line   two  \n";

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/plain"))
        .mount(&mock_server)
        .await;

    let crawler = test_crawler(&Config::default());

    let result = crawler.crawl_url(&mock_server.uri(), Mode::BodyOnly).await;
    let page = result.as_success().expect("Expected success");
    assert_eq!(page.content(), "line one line two");
    assert!(page.content_type().starts_with("text/plain"));
    assert!(page.links().is_empty());

    let result = crawler.crawl_url(&mock_server.uri(), Mode::FullPage).await;
    assert_eq!(result.as_success().expect("Expected success").content(), body);
}

#[tokio::test]
async fn test_unknown_charset_reported_as_utf8() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<main>Plain</main>", "text/html; charset=x-unknown"),
        )
        .mount(&mock_server)
        .await;

    let result = test_crawler(&Config::default())
        .crawl_url(&mock_server.uri(), Mode::BodyOnly)
        .await;

    let page = result.as_success().expect("Expected success");
    assert_eq!(page.encoding(), "utf-8");
    assert_eq!(page.content(), "Plain");
}

#[tokio::test]
async fn test_redirect_followed_and_links_resolved_against_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/docs/", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/"))
        .respond_with(html(r#"<main><a href="intro">Intro</a></main>"#))
        .mount(&mock_server)
        .await;

    let result = test_crawler(&Config::default())
        .crawl_url(&format!("{}/old", base_url), Mode::BodyOnly)
        .await;

    let page = result.as_success().expect("Expected success");
    assert_eq!(page.url(), format!("{}/old", base_url));
    assert_eq!(page.status_code(), 200);
    assert_eq!(page.links().internal, vec![format!("{}/docs/intro", base_url)]);
}

#[tokio::test]
async fn test_json_export_of_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html(r#"<main>Hi <a href="/a">a</a></main>"#))
        .mount(&mock_server)
        .await;

    let results: Vec<CrawlResult> = test_crawler(&Config::default())
        .crawl_many(&[mock_server.uri(), unreachable_url()], Mode::BodyOnly)
        .await;

    let json = to_json(&results).expect("Failed to serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");

    assert_eq!(value[0]["success"], true);
    assert_eq!(value[0]["content"], "Hi a");
    assert_eq!(value[0]["internal_links_count"], 1);
    assert_eq!(value[0]["total_links_count"], 1);
    assert_eq!(value[0]["mode"], "body_only");
    assert_eq!(value[1]["success"], false);
    assert!(value[1]["error"].is_string());
    assert!(value[1].get("content").is_none());
}
