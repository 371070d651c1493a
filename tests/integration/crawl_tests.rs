//! Integration tests for the scanner
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! walk-then-analyze cycle end-to-end through the HTTP renderer.

use site_signals::config::Config;
use site_signals::crawler::{analyze_page, Orchestrator};
use site_signals::output::{save_results, SkipLog, SkipRecorder};
use site_signals::render::{CookieRecord, HttpRenderer, RedirectMode, RenderSession, Renderer};
use site_signals::state::SkipReason;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.navigation_timeout_ms = 5_000;
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mounts a small site:
///
/// ```text
/// /          -> /contact, /about, /private, /docs/brochure.pdf, mailto:, #top, external
/// /contact   -> form, map iframe, session cookie
/// /about     -> /moved (301), /missing (404)
/// ```
async fn mount_site(server: &MockServer) {
    let base = server.uri();

    mount_page(
        server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
    )
    .await;

    mount_page(
        server,
        "/",
        html(&format!(
            r##"<a href="/contact">Contact</a>
            <a href="{base}/about">About</a>
            <a href="/private">Private</a>
            <a href="/docs/brochure.pdf">Brochure</a>
            <a href="mailto:info@example.com">Mail</a>
            <a href="#top">Top</a>
            <a href="https://other.example/">Elsewhere</a>"##
        )),
    )
    .await;

    mount_page(
        server,
        "/contact",
        html(
            r#"<form action="/send"><input name="email"></form>
            <iframe src="https://www.google.com/maps/embed?pb=!1m18"></iframe>"#,
        )
        .insert_header("set-cookie", "sid=abc123; Path=/; HttpOnly"),
    )
    .await;

    mount_page(
        server,
        "/about",
        html(r#"<a href="/moved">Moved</a><a href="/missing">Missing</a><a href="/contact">Contact</a>"#),
    )
    .await;

    mount_page(
        server,
        "/moved",
        ResponseTemplate::new(301).insert_header("location", "/contact"),
    )
    .await;

    mount_page(server, "/private", html("secret")).await;
}

fn orchestrator(recorder: Arc<SkipRecorder>) -> Orchestrator {
    let config = test_config();
    let renderer = Arc::new(HttpRenderer::new(&config));
    Orchestrator::new(config, renderer, recorder).expect("Failed to create orchestrator")
}

#[tokio::test]
async fn test_full_scan_single_domain() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let domain = server.uri();

    let recorder = Arc::new(SkipRecorder::new());
    let results = orchestrator(recorder.clone()).run(&[domain.clone()]).await;

    let result = results.get(&domain).expect("Domain missing from results");
    let urls: Vec<&str> = result.subpages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/contact", domain),
            format!("{}/about", domain),
            format!("{}/moved", domain),
            format!("{}/missing", domain),
        ]
    );

    assert_eq!(result.total_subpages_analyzed, 4);
    // /moved is analyzed at its redirect target
    assert_eq!(result.total_cookies_found, 2);
    assert_eq!(
        result.subpages_with_forms,
        vec![format!("{}/contact", domain), format!("{}/moved", domain)]
    );
    assert_eq!(
        result.subpages_with_google_maps,
        vec![format!("{}/contact", domain), format!("{}/moved", domain)]
    );
    assert_eq!(
        result.subpages[0].cookies,
        vec![CookieRecord::new("sid", "127.0.0.1")]
    );

    let skips = recorder.events();
    let private: Vec<_> = skips
        .iter()
        .filter(|s| s.url == format!("{}/private", domain))
        .collect();
    assert_eq!(private.len(), 1);
    assert_eq!(private[0].reason, SkipReason::DisallowedByRobots);

    let non_success: Vec<&str> = skips
        .iter()
        .filter(|s| s.reason == SkipReason::NonSuccessResponse)
        .map(|s| s.url.as_str())
        .collect();
    assert_eq!(
        non_success,
        vec![format!("{}/moved", domain), format!("{}/missing", domain)]
    );

    // The disallowed page is never requested
    let requests = server.received_requests().await.unwrap();
    assert!(!requests.iter().any(|r| r.url.path() == "/private"));
}

#[tokio::test]
async fn test_results_json_shape() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let domain = server.uri();

    let results = orchestrator(Arc::new(SkipRecorder::new()))
        .run(&[domain.clone()])
        .await;

    let dir = tempdir().unwrap();
    let file = save_results(&results, &dir.path().join("analysis")).unwrap();
    let content = std::fs::read_to_string(&file).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    let entry = &value[&domain];
    assert_eq!(entry["totalSubpagesAnalyzed"], 4);
    assert_eq!(entry["totalCookiesFound"], 2);
    assert_eq!(entry["subpagesWithForms"][0], format!("{}/contact", domain));
    assert_eq!(
        entry["subpagesWithGoogleMaps"][0],
        format!("{}/contact", domain)
    );

    let contact = &entry["subpages"][0];
    assert_eq!(contact["url"], format!("{}/contact", domain));
    assert_eq!(contact["hasForm"], true);
    assert_eq!(contact["hasGoogleMaps"], true);
    assert_eq!(contact["cookies"][0]["name"], "sid");
    assert_eq!(contact["cookies"][0]["type"], "127.0.0.1");
}

#[tokio::test]
async fn test_skip_log_file_lines() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let domain = server.uri();

    let dir = tempdir().unwrap();
    let log_path = dir.path().join("logs").join("skipped_pages.log");
    let skip_log = Arc::new(SkipLog::open(&log_path).unwrap());

    let config = test_config();
    let renderer = Arc::new(HttpRenderer::new(&config));
    let orchestrator = Orchestrator::new(config, renderer, skip_log).unwrap();
    orchestrator.run(&[domain.clone()]).await;

    let content = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);

    let expected = format!(
        "Domain: {d}, URL: {d}/private, Reason: Disallowed by robots.txt",
        d = domain
    );
    let line = lines
        .iter()
        .find(|line| line.ends_with(&expected))
        .expect("Missing robots skip line");
    assert!(line.starts_with('['));
    assert!(line.contains("] Domain: "));
}

#[tokio::test]
async fn test_depth_limit_over_http() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html(r#"<a href="/l1">1</a>"#)).await;
    mount_page(&server, "/l1", html(r#"<a href="/l2">2</a>"#)).await;
    mount_page(&server, "/l2", html(r#"<a href="/l3">3</a>"#)).await;
    mount_page(&server, "/l3", html(r#"<a href="/l4">4</a>"#)).await;
    let domain = server.uri();

    let results = orchestrator(Arc::new(SkipRecorder::new()))
        .run(&[domain.clone()])
        .await;

    let result = results.get(&domain).unwrap();
    assert_eq!(result.total_subpages_analyzed, 3);

    let requests = server.received_requests().await.unwrap();
    let count = |p: &str| requests.iter().filter(|r| r.url.path() == p).count();
    // l3 is only loaded for analysis, never walked
    assert_eq!(count("/l3"), 1);
    assert_eq!(count("/l4"), 0);
    assert_eq!(count("/l1"), 2);
}

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html(r#"<a href="/private">Private</a>"#)).await;
    mount_page(&server, "/private", html("open")).await;
    let domain = server.uri();

    let recorder = Arc::new(SkipRecorder::new());
    let results = orchestrator(recorder.clone()).run(&[domain.clone()]).await;

    let result = results.get(&domain).unwrap();
    assert_eq!(result.total_subpages_analyzed, 1);
    assert!(recorder.events().is_empty());
}

#[tokio::test]
async fn test_unreachable_domain_does_not_stop_run() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let domain = server.uri();
    let unreachable = "http://127.0.0.1:9".to_string();

    let config = Config {
        crawler: site_signals::config::CrawlerConfig {
            navigation_timeout_ms: 1_000,
            ..test_config().crawler
        },
        ..test_config()
    };
    let renderer = Arc::new(HttpRenderer::new(&config));
    let recorder = Arc::new(SkipRecorder::new());
    let orchestrator = Orchestrator::new(config, renderer, recorder.clone()).unwrap();

    let results = orchestrator.run(&[unreachable.clone(), domain.clone()]).await;

    let dead = results.get(&unreachable).unwrap();
    assert_eq!(dead.total_subpages_analyzed, 0);
    assert!(recorder
        .events()
        .iter()
        .any(|s| s.url == unreachable && s.reason.is_error()));

    assert_eq!(results.get(&domain).unwrap().total_subpages_analyzed, 4);
    let domains: Vec<&str> = results.iter().map(|(d, _)| d).collect();
    assert_eq!(domains, vec![unreachable.as_str(), domain.as_str()]);
}

#[tokio::test]
async fn test_http_session_reports_redirect_without_following() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let renderer = HttpRenderer::with_settings("TestBrowser/1.0", Duration::from_secs(5));
    let mut session = renderer.open_session(RedirectMode::Report).await.unwrap();

    let status = session
        .navigate(&format!("{}/moved", server.uri()))
        .await
        .unwrap();
    assert_eq!(status, Some(301));

    let status = session
        .navigate(&format!("{}/contact", server.uri()))
        .await
        .unwrap();
    assert_eq!(status, Some(200));
    assert!(session.has_form().await.unwrap());
    assert_eq!(
        session.iframe_sources().await.unwrap(),
        vec!["https://www.google.com/maps/embed?pb=!1m18"]
    );

    session.close().await;
}

#[tokio::test]
async fn test_analysis_follows_redirect_to_target() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    mount_page(
        &server,
        "/kontakt",
        ResponseTemplate::new(301).insert_header("location", "/contact"),
    )
    .await;

    let renderer = HttpRenderer::with_settings("TestBrowser/1.0", Duration::from_secs(5));
    let url = format!("{}/kontakt", server.uri());

    let analysis = analyze_page(&renderer, &url, Duration::from_secs(5)).await;

    assert_eq!(analysis.url, url);
    assert!(analysis.has_form);
    assert!(analysis.has_google_maps);
    assert_eq!(analysis.cookies, vec![CookieRecord::new("sid", "127.0.0.1")]);
}
