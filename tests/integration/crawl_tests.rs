//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use frontier_crawler::config::{Config, CrawlerConfig, OutputConfig};
use frontier_crawler::crawler::{crawl, Coordinator, Fetch, HttpFetcher, Termination};
use frontier_crawler::output::{read_crawled_list, write_crawled_list};
use frontier_crawler::storage::{CrawlStore, SqliteStorage};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at `seed` with no politeness delay
fn create_test_config(seed: &str, dir: &TempDir) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed: seed.to_string(),
            max_crawled_url: 50,
            politeness_criterion: 0.0,
            max_url_by_pages: 5,
            fetch_timeout: 5,
            cancel_grace: 1,
            ..CrawlerConfig::default()
        },
        output: OutputConfig {
            database_path: dir.path().join("age_db.db").display().to_string(),
            crawled_path: dir.path().join("crawled.txt").display().to_string(),
        },
    }
}

fn coordinator(config: &Config) -> Coordinator<HttpFetcher, SqliteStorage> {
    let fetcher = HttpFetcher::new(&config.crawler).expect("Failed to build fetcher");
    let store = SqliteStorage::new(Path::new(&config.output.database_path))
        .expect("Failed to open database");
    Coordinator::new(
        config.crawler.clone(),
        fetcher,
        store,
        CancellationToken::new(),
    )
    .expect("Failed to build coordinator")
}

fn html_page(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw(format!("<html><body>{}</body></html>", body), "text/html")
}

fn links(base: &str, paths: &[&str]) -> String {
    paths
        .iter()
        .map(|p| format!(r#"<a href="{}{}">{}</a>"#, base, p, p))
        .collect()
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, content: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(content))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_page(&server, "/", links(&base, &["/page1", "/page2"])).await;
    mount_page(&server, "/page1", links(&base, &["/page3", "/"])).await;
    mount_page(&server, "/page2", "Content 2".to_string()).await;
    mount_page(&server, "/page3", "Content 3".to_string()).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", base), &dir);

    let mut coordinator = coordinator(&config);
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.termination, Termination::FrontierExhausted);
    assert_eq!(report.crawled.len(), 4);
    for page in ["/", "/page1", "/page2", "/page3"] {
        let url = format!("{}{}", base, page);
        assert!(report.crawled.contains(&url), "missing {}", url);
        assert!(
            coordinator.store().last_crawled(&url).unwrap().is_some(),
            "no timestamp for {}",
            url
        );
    }
}

#[tokio::test]
async fn test_robots_disallowed_path_not_crawled() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nDisallow: /private/").await;
    mount_page(&server, "/", links(&base, &["/private/secret", "/public"])).await;
    mount_page(&server, "/public", "public".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(html_page("secret".to_string()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", base), &dir);

    let report = coordinator(&config).run().await.unwrap();

    assert_eq!(report.crawled.len(), 2);
    assert!(!report
        .crawled
        .contains(&format!("{}/private/secret", base)));
}

#[tokio::test]
async fn test_forbidden_robots_blocks_all_admissions() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    mount_page(&server, "/", links(&base, &["/a", "/b"])).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", base), &dir);

    let report = coordinator(&config).run().await.unwrap();

    assert_eq!(report.crawled, vec![format!("{}/", base)]);
    assert_eq!(report.admitted_from_pages, 0);
}

#[tokio::test]
async fn test_per_page_cap_keeps_first_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    let paths: Vec<String> = (0..10).map(|i| format!("/p{}", i)).collect();
    let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    mount_page(&server, "/", links(&base, &path_refs)).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/", base), &dir);
    config.crawler.max_url_by_pages = 3;

    let report = coordinator(&config).run().await.unwrap();

    assert_eq!(report.crawled.len(), 4);
    for p in &paths[..3] {
        assert!(report.crawled.contains(&format!("{}{}", base, p)));
    }
    assert!(!report.crawled.contains(&format!("{}/p3", base)));
}

#[tokio::test]
async fn test_crawl_limit_bounds_output() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links(&base, &["/a", "/b", "/c", "/d"])).await;
    mount_page(&server, "/a", links(&base, &["/e", "/f"])).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/", base), &dir);
    config.crawler.max_crawled_url = 3;

    let report = coordinator(&config).run().await.unwrap();

    assert_eq!(report.termination, Termination::LimitReached);
    assert_eq!(report.crawled.len(), 3);
}

#[tokio::test]
async fn test_seed_only_bound_makes_no_requests() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .respond_with(html_page(String::new()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/", base), &dir);
    config.crawler.max_crawled_url = 1;

    let report = coordinator(&config).run().await.unwrap();

    assert_eq!(report.crawled, vec![format!("{}/", base)]);
    assert_eq!(report.termination, Termination::LimitReached);
}

#[tokio::test]
async fn test_timed_out_page_still_crawled() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links(&base, &["/slow", "/fast"])).await;
    mount_page(&server, "/fast", "fast".to_string()).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            html_page(links(&base, &["/hidden"])).set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/", base), &dir);
    config.crawler.fetch_timeout = 1;

    let report = coordinator(&config).run().await.unwrap();

    assert_eq!(report.termination, Termination::FrontierExhausted);
    assert!(report.crawled.contains(&format!("{}/slow", base)));
    assert!(report.crawled.contains(&format!("{}/fast", base)));
    assert!(!report.crawled.contains(&format!("{}/hidden", base)));
}

#[tokio::test]
async fn test_sitemaps_disabled_makes_no_sitemap_requests() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(
        &server,
        &format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml", base),
    )
    .await;
    mount_page(&server, "/", links(&base, &["/a"])).await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<urlset></urlset>"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/", base), &dir);
    config.crawler.max_url_by_sitemaps = 10;

    let report = coordinator(&config).run().await.unwrap();
    assert_eq!(report.admitted_from_sitemaps, 0);
}

#[tokio::test]
async fn test_sitemap_exploration_admits_listed_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(
        &server,
        &format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml", base),
    )
    .await;
    mount_page(&server, "/", links(&base, &["/a"])).await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/from-sitemap-1</loc></url>
  <url><loc>{base}/from-sitemap-2</loc></url>
  <url><loc>{base}/from-sitemap-3</loc></url>
</urlset>"#
                ),
                "application/xml",
            ),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/", base), &dir);
    config.crawler.explore_sitemaps = true;
    config.crawler.max_url_by_sitemaps = 2;

    let mut coordinator = coordinator(&config);
    let report = coordinator.run().await.unwrap();

    // Two per pass: the third listed URL arrives on the next page's pass
    assert_eq!(report.admitted_from_sitemaps, 3);
    for i in 1..=3 {
        assert!(report.crawled.contains(&format!("{}/from-sitemap-{}", base, i)));
    }
    assert_eq!(report.termination, Termination::FrontierExhausted);
}

#[tokio::test]
async fn test_crawl_entry_point_writes_database_and_list() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links(&base, &["/a", "/b"])).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", base), &dir);

    let report = crawl(&config, CancellationToken::new()).await.unwrap();

    let output = Path::new(&config.output.crawled_path);
    write_crawled_list(output, &report.crawled).unwrap();
    assert_eq!(read_crawled_list(output).unwrap(), report.crawled);

    let store = SqliteStorage::new(Path::new(&config.output.database_path)).unwrap();
    assert_eq!(store.count_records().unwrap(), 3);
}

#[tokio::test]
async fn test_rerun_updates_existing_records() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links(&base, &["/a"])).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/", base), &dir);

    crawl(&config, CancellationToken::new()).await.unwrap();
    let store = SqliteStorage::new(Path::new(&config.output.database_path)).unwrap();
    let first = store.last_crawled(&format!("{}/a", base)).unwrap().unwrap();
    drop(store);

    crawl(&config, CancellationToken::new()).await.unwrap();
    let store = SqliteStorage::new(Path::new(&config.output.database_path)).unwrap();

    assert_eq!(store.count_records().unwrap(), 2);
    let second = store.last_crawled(&format!("{}/a", base)).unwrap().unwrap();
    assert!(second >= first);
}

#[tokio::test]
async fn test_invalid_seed_rejected_before_network() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config("ftp://example.com/", &dir);

    let result = crawl(&config, CancellationToken::new()).await;
    assert!(result.is_err());
    assert!(!Path::new(&config.output.database_path).exists());
}

#[tokio::test]
async fn test_mocked_pages_are_served_as_html() {
    let server = MockServer::start().await;
    mount_page(&server, "/", String::new()).await;

    let config = create_test_config(&format!("{}/", server.uri()), &TempDir::new().unwrap());
    let fetcher = HttpFetcher::new(&config.crawler).unwrap();
    let page = fetcher.get(&config.crawler.seed).await.unwrap();

    assert!(page.is_html(), "content type {:?}", page.content_type);
}
