#![allow(clippy::unwrap_used)]
// Integration tests for `BackendClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitepulse_api::{BackendClient, Error, SiteQuery};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BackendClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = BackendClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn site(location: &str, name: &str, domain: &str) -> serde_json::Value {
    json!({
        "server_location": location,
        "program_name": name,
        "domain_name": domain,
        "backend_url": format!("https://origin.{domain}/api/v1"),
    })
}

// ── Registry tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sites_flat_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [site("biznet-1", "Alpha", "a.com"), site("biznet-2", "Beta", "b.com")]
        })))
        .mount(&server)
        .await;

    let page = client.list_sites(&SiteQuery::default()).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items[0].program_name, "Alpha");
    assert_eq!(page.items[1].server_location, "biznet-2");
}

#[tokio::test]
async fn test_list_sites_forwards_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param("selectedServer", "biznet-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [site("biznet-1", "Alpha", "a.com")],
                "total": 11, "page": 2, "limit": 10, "totalPages": 2
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .list_sites(&SiteQuery {
            page: Some(2),
            limit: Some(10),
            selected_server: Some("biznet-1".into()),
        })
        .await
        .unwrap();
    assert_eq!(page.total, 11);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_list_sites_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let result = client.list_sites(&SiteQuery::default()).await;
    assert!(
        matches!(result, Err(Error::Registry { status: 502, .. })),
        "expected Registry error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_sites_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_sites(&SiteQuery::default()).await;
    match result {
        Err(Error::Deserialization { body, .. }) => assert!(body.contains("oops")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_all_sites_follows_total_pages() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [site("biznet-1", "Alpha", "a.com")],
                "total": 2, "page": 1, "limit": 1, "totalPages": 2
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [site("biznet-2", "Beta", "b.com")],
                "total": 2, "page": 2, "limit": 1, "totalPages": 2
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let all = client.list_all_sites(1, None).await.unwrap();
    let names: Vec<_> = all.iter().map(|s| s.program_name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta"]);
}

#[tokio::test]
async fn test_list_all_sites_stops_on_empty_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "items": [site("biznet-1", "Alpha", "a.com")],
                "total": 50, "page": 1, "limit": 1, "totalPages": 50
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "items": [], "total": 50, "page": 2, "limit": 1, "totalPages": 50 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let all = client.list_all_sites(1, None).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_list_all_sites_unpaged() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/get-data-client"))
        .and(query_param_is_missing("page"))
        .and(query_param("selectedServer", "biznet-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [site("biznet-2", "Beta", "b.com")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let all = client.list_all_sites(0, Some("biznet-2")).await.unwrap();
    assert_eq!(all.len(), 1);
}

// ── Domain check tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_check_domain_passes_url_through() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/check"))
        .and(query_param("url", "https://a.com/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ONLINE" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.check_domain("https://a.com/login").await.unwrap();
    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("ONLINE"));
}

#[tokio::test]
async fn test_check_domain_accepts_error_statuses() {
    let (server, client) = setup().await;

    for (domain, code) in [("waf.com", 403), ("busy.com", 503), ("broken.com", 500)] {
        Mock::given(method("GET"))
            .and(path("/api/check"))
            .and(query_param("url", domain))
            .respond_with(ResponseTemplate::new(code).set_body_string("nope"))
            .mount(&server)
            .await;
    }

    for (domain, code) in [("waf.com", 403), ("busy.com", 503), ("broken.com", 500)] {
        let resp = client.check_domain(domain).await.unwrap();
        assert_eq!(resp.status, code);
        assert_eq!(resp.body, "nope");
    }
}

#[tokio::test]
async fn test_check_domain_timeout_is_error() {
    let (server, client) = setup().await;
    let client = client.with_timeouts(Duration::from_secs(5), Duration::from_millis(100));

    Mock::given(method("GET"))
        .and(path("/api/check"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = client.check_domain("slow.com").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got: {err:?}");
}
