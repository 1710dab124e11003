//! Integration tests using a mock HTTP server
//!
//! Exercises the full end-to-end flow: settings → client → paginated fetch →
//! extraction → table cleaning.

use scrapekit::config::ClientSettings;
use scrapekit::extract::RecordPath;
use scrapekit::fetcher::{ApiClient, FetchOptions};
use scrapekit::http::{HttpClient, HttpClientConfig, RequestConfig};
use scrapekit::pagination::{LinkPaginator, PageNumberPaginator};
use scrapekit::policy::FetchPolicy;
use scrapekit::scrape::{self, PageScraper};
use scrapekit::table::Table;
use scrapekit::text::{NormalizeOptions, TextNormalizer};
use scrapekit::types::{FillStrategy, Method};
use scrapekit::Error;
use serde_json::json;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Paginated Fetching
// ============================================================================

#[tokio::test]
async fn test_link_pagination_end_to_end() {
    let mock_server = MockServer::start().await;

    // Page 1 returns ["a", "b"] with a next link to /p2;
    // page 2 returns ["c"] with no next link
    let next = format!("<{}/p2>; rel=\"next\"", mock_server.uri());
    Mock::given(method("GET"))
        .and(path("/p1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next.as_str())
                .set_body_json(json!(["a", "b"])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["c"])))
        .mount(&mock_server)
        .await;

    let client = ApiClient::for_base_url(mock_server.uri());
    let records = client
        .fetch_paginated_records(
            "/p1",
            FetchOptions::new(),
            &LinkPaginator::default(),
            &RecordPath::root(),
        )
        .await
        .unwrap();

    assert_eq!(records, vec![json!("a"), json!("b"), json!("c")]);
}

#[tokio::test]
async fn test_three_page_order_preserved() {
    let mock_server = MockServer::start().await;

    let next1 = format!("<{}/chain-2>; rel=\"next\"", mock_server.uri());
    let next2 = format!("<{}/chain-3>; rel=\"next\"", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/chain-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next1.as_str())
                .set_body_json(json!({"items": [1, 2]})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/chain-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next2.as_str())
                .set_body_json(json!({"items": [3]})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/chain-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [4, 5]})))
        .mount(&mock_server)
        .await;

    let client = ApiClient::for_base_url(mock_server.uri());
    let records = client
        .fetch_paginated_records(
            "/chain-1",
            FetchOptions::new(),
            &LinkPaginator::default(),
            &RecordPath::new("items"),
        )
        .await
        .unwrap();

    // Strict page-then-item order
    assert_eq!(
        records,
        vec![json!(1), json!(2), json!(3), json!(4), json!(5)]
    );
}

#[tokio::test]
async fn test_page_number_pagination_sends_numeric_params() {
    let mock_server = MockServer::start().await;

    let next = format!("<{}/numbered?page=2>; rel=\"next\"", mock_server.uri());
    Mock::given(method("GET"))
        .and(path("/numbered"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next.as_str())
                .set_body_json(json!([{"n": 1}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/numbered"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"n": 2}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::for_base_url(mock_server.uri());
    let records = client
        .fetch_paginated_records(
            "/numbered",
            FetchOptions::new(),
            &PageNumberPaginator::new("page", 1),
            &RecordPath::root(),
        )
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["n"], 1);
    assert_eq!(records[1]["n"], 2);
}

// ============================================================================
// Policy Enforcement
// ============================================================================

struct DenyAll;

#[async_trait::async_trait]
impl FetchPolicy for DenyAll {
    async fn can_fetch(&self, _user_agent: &str, _url: &Url) -> bool {
        false
    }
}

#[tokio::test]
async fn test_policy_denial_issues_no_network_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guarded"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .build();
    let http = HttpClient::with_config(config).with_policy(Arc::new(DenyAll));

    let err = http.get("/guarded").await.unwrap_err();
    assert!(matches!(err, Error::PolicyDenied { .. }));
}

#[tokio::test]
async fn test_robots_txt_enforced_on_scrape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nDisallow: /members\nAllow: /members/faq\n"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/members/faq"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><p>faq</p></html>"))
        .mount(&mock_server)
        .await;

    let scraper = PageScraper::with_robots(&mock_server.uri(), HttpClientConfig::default())
        .await
        .unwrap();

    // Longest-match rule: /members/faq is allowed, /members/area is not
    let html = scraper
        .fetch_page("/members/faq", None, Method::Get)
        .await
        .unwrap();
    assert!(html.contains("faq"));

    let err = scraper
        .fetch_page("/members/area", None, Method::Get)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PolicyDenied { .. }));
}

// ============================================================================
// Retry Wrapper
// ============================================================================

#[tokio::test]
async fn test_retry_budget_of_three_survives_two_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/unstable"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/unstable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ready": true})))
        .mount(&mock_server)
        .await;

    let client = ApiClient::for_base_url(mock_server.uri());
    let value = client
        .fetch_json_with_retry("/unstable", Method::Get, RequestConfig::default(), 3)
        .await
        .unwrap();

    assert_eq!(value["ready"], true);
}

#[tokio::test]
async fn test_retry_budget_of_two_reports_second_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/unstable"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/unstable"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ready": true})))
        .mount(&mock_server)
        .await;

    let client = ApiClient::for_base_url(mock_server.uri());
    let err = client
        .fetch_json_with_retry("/unstable", Method::Get, RequestConfig::default(), 2)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

// ============================================================================
// Scrape → Clean Flow
// ============================================================================

#[tokio::test]
async fn test_scrape_table_into_cleaning_pipeline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><table>
                <tr><th>city</th><th>score</th></tr>
                <tr><td>Berlin</td><td>10</td></tr>
                <tr><td>Madrid</td><td>30</td></tr>
                <tr><td>Berlin</td><td>10</td></tr>
            </table></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let scraper = PageScraper::new(&mock_server.uri()).unwrap();
    let rows = scraper
        .scrape_data("/report", None, Method::Get, |doc| {
            scrape::extract_table(doc, "table")
        })
        .await
        .unwrap();

    let records: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|row| {
            json!({
                "city": row["city"],
                "score": row["score"].parse::<f64>().unwrap(),
            })
        })
        .collect();

    let table = Table::from_records(records)
        .unwrap()
        .drop_duplicates()
        .min_max_normalize();

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0]["score"], 0.0);
    assert_eq!(table.rows()[1]["score"], 1.0);
}

#[tokio::test]
async fn test_paginated_fetch_into_fill_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"sensor": "a", "value": 10},
                {"sensor": "b", "value": null},
                {"sensor": "c", "value": 20}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::for_base_url(mock_server.uri());
    let records = client
        .fetch_paginated_records(
            "/metrics",
            FetchOptions::new(),
            &LinkPaginator::default(),
            &RecordPath::new("data"),
        )
        .await
        .unwrap();

    let table = Table::from_records(records)
        .unwrap()
        .fill_missing(FillStrategy::Mean);

    assert_eq!(table.rows()[1]["value"], 15.0);
}

// ============================================================================
// Text Normalization
// ============================================================================

#[test]
fn test_normalizer_on_scraped_fragment() {
    let normalizer = TextNormalizer::new();
    let cleaned = normalizer.normalize(
        "<h1>Breaking: The 7 Habits of Highly Effective Scrapers!</h1>",
        &NormalizeOptions::default(),
    );
    assert_eq!(cleaned, "breaking habits highly effective scrapers");
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_drive_the_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .and(wiremock::matchers::header("X-API-Key", "k3y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pong": true})))
        .mount(&mock_server)
        .await;

    let yaml = format!(
        "base_url: {}\nheaders:\n  X-API-Key: k3y\nuser_agent: settings-bot/1.0\n",
        mock_server.uri()
    );
    let settings = ClientSettings::from_yaml(&yaml).unwrap();
    let client = ApiClient::new(settings.to_http_config());

    let value = client.fetch_json("/v1/ping").await.unwrap();
    assert_eq!(value["pong"], true);
}
