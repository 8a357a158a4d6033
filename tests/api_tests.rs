use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;

use marquee::api::{create_router, AppState};
use marquee::error::{AppError, AppResult};
use marquee::models::{Category, SearchPage, SearchRecord};
use marquee::services::playback::{SourceChain, SourceStrategy, VidsrcStrategy};
use marquee::services::providers::MetadataProvider;

/// Provider serving a fixed two-record page per category
struct CannedProvider {
    fail_series: bool,
}

#[async_trait::async_trait]
impl MetadataProvider for CannedProvider {
    async fn search(&self, query: &str, category: Category) -> AppResult<SearchPage> {
        if self.fail_series && category == Category::Series {
            return Err(AppError::Provider("series lookup failed".to_string()));
        }

        let record = |id: i64, label: &str, poster: &str| SearchRecord {
            id,
            name: Some(format!("{query} {label}")),
            title: Some(format!("{query} {label}")),
            poster_path: Some(poster.to_string()),
            backdrop_path: None,
        };
        Ok(SearchPage {
            results: vec![record(1, "one", "/one.jpg"), record(2, "two", "/two.jpg")],
            total_results: Some(2),
        })
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

fn create_test_server(provider: CannedProvider) -> TestServer {
    let strategies: Vec<Box<dyn SourceStrategy>> =
        vec![Box::new(VidsrcStrategy::new("https://vidsrc.me"))];
    let state = AppState::new(Arc::new(provider), Arc::new(SourceChain::new(strategies)));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(CannedProvider { fail_series: false });

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_search_returns_normalized_lists_for_both_categories() {
    let server = create_test_server(CannedProvider { fail_series: false });

    let response = server
        .get("/api/v1/search")
        .add_query_param("q", "batman")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let movies = body["movies"].as_array().unwrap();
    let series = body["series"].as_array().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(series.len(), 2);

    // The raw page order is reversed during normalization.
    assert_eq!(movies[0]["title"], "batman two");
    assert_eq!(movies[1]["title"], "batman one");
    assert_eq!(series[0]["title"], "batman two");

    assert_eq!(movies[0]["provider_id"], "2");
    assert_eq!(movies[0]["poster_path"], movies[0]["backdrop_path"]);
    assert_eq!(movies[0]["category"], "movie");
    assert_eq!(series[0]["category"], "series");
    assert_eq!(movies[0]["external_id"], "");
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let server = create_test_server(CannedProvider { fail_series: false });

    let response = server.get("/api/v1/search").add_query_param("q", "").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("q"));

    let response = server.get("/api/v1/search").add_query_param("q", "   ").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_degrades_when_one_category_fails() {
    let server = create_test_server(CannedProvider { fail_series: true });

    let response = server
        .get("/api/v1/search")
        .add_query_param("q", "batman")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["movies"].as_array().unwrap().len(), 2);
    assert!(body["series"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_movie_url() {
    let server = create_test_server(CannedProvider { fail_series: false });

    let response = server
        .get("/api/v1/resolve")
        .add_query_param("external_id", "tt123")
        .add_query_param("category", "movie")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["url"], "https://vidsrc.me/embed/tt123");
}

#[tokio::test]
async fn test_resolve_series_url_defaults_to_first_episode() {
    let server = create_test_server(CannedProvider { fail_series: false });

    let response = server
        .get("/api/v1/resolve")
        .add_query_param("external_id", "tt999")
        .add_query_param("category", "series")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["url"], "https://vidsrc.me/embed/tt999/1-1");
}

#[tokio::test]
async fn test_resolve_series_url_with_explicit_slot() {
    let server = create_test_server(CannedProvider { fail_series: false });

    let response = server
        .get("/api/v1/resolve")
        .add_query_param("external_id", "tt999")
        .add_query_param("category", "series")
        .add_query_param("season", "2")
        .add_query_param("episode", "5")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["url"], "https://vidsrc.me/embed/tt999/2-5");
}

#[tokio::test]
async fn test_resolve_without_external_id_misses() {
    let server = create_test_server(CannedProvider { fail_series: false });

    let response = server
        .get("/api/v1/resolve")
        .add_query_param("external_id", "")
        .add_query_param("category", "movie")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["url"], serde_json::Value::Null);
}
