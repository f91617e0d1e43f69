mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use site_links::api::handlers::health_handler;
use site_links::infrastructure::content::StaticRedirectSource;
use site_links::state::AppState;
use std::sync::Arc;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = common::create_test_state(common::sample_records());
    state.redirect_cache.refresh().await.unwrap();

    let response = server(state).get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["redirect_cache"]["status"], "ok");
    assert!(
        json["checks"]["redirect_cache"]["message"]
            .as_str()
            .unwrap()
            .starts_with("fresh, 3 short codes")
    );
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let state = common::create_test_state(Vec::new());

    let response = server(state).get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("redirect_cache").is_some());
}

#[tokio::test]
async fn test_health_degraded_after_failed_refresh() {
    let source = Arc::new(StaticRedirectSource::from_file(
        "/nonexistent/redirects.json",
    ));
    let state = common::create_state_with_source(source);
    assert!(state.redirect_cache.refresh().await.is_err());

    let response = server(state).get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["redirect_cache"]["status"], "error");
}
