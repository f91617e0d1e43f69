use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use site_links::domain::repositories::{ContentError, RedirectSource};
use site_links::infrastructure::content::{DEFAULT_REDIRECTS_QUERY, HttpRedirectSource};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    calls: Arc<AtomicUsize>,
}

async fn query_handler(
    State(upstream): State<Upstream>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    upstream.calls.fetch_add(1, Ordering::SeqCst);

    if upstream.status != StatusCode::OK {
        return (upstream.status, "upstream says no").into_response();
    }

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer test-token");
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if params.get("query").map(String::as_str) != Some(DEFAULT_REDIRECTS_QUERY) {
        return (StatusCode::BAD_REQUEST, "unexpected query").into_response();
    }

    Json(json!({
        "ms": 3,
        "result": [
            { "source": "/go.php?bid=42", "destination": "https://partner.example/offer", "permanent": true },
            { "source": "/old-news", "destination": "/news", "permanent": null }
        ]
    }))
    .into_response()
}

async fn spawn_upstream(status: StatusCode) -> (SocketAddr, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v1/query", get(query_handler))
        .with_state(Upstream {
            status,
            calls: calls.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, calls)
}

fn source(addr: SocketAddr, token: Option<&str>) -> HttpRedirectSource {
    HttpRedirectSource::new(
        &format!("http://{addr}/v1/query"),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetch_redirects_success() {
    let (addr, calls) = spawn_upstream(StatusCode::OK).await;

    let records = source(addr, Some("test-token"))
        .fetch_redirects()
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].source, "/go.php?bid=42");
    assert!(records[0].permanent);
    assert_eq!(records[1].destination, "/news");
    assert!(!records[1].permanent);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rejected_credentials_are_not_retried() {
    let (addr, calls) = spawn_upstream(StatusCode::OK).await;

    let result = source(addr, None)
        .with_max_retries(3)
        .fetch_redirects()
        .await;

    assert!(matches!(result, Err(ContentError::Http { status: 401, .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let (addr, calls) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE).await;

    let result = source(addr, Some("test-token"))
        .with_max_retries(2)
        .fetch_redirects()
        .await;

    match result {
        Err(ContentError::Http { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream says no");
        }
        other => panic!("expected http error, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = source(addr, None)
        .with_max_retries(0)
        .fetch_redirects()
        .await;

    assert!(matches!(result, Err(ContentError::Transport(_))));
}

async fn slow_first_handler(State(calls): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    Json(json!({
        "result": [
            { "source": "/go.php?bid=1", "destination": "/one", "permanent": true }
        ]
    }))
}

#[tokio::test]
async fn test_timed_out_attempt_is_retried_within_budget() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v1/query", get(slow_first_handler))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let source = HttpRedirectSource::new(
        &format!("http://{addr}/v1/query"),
        None,
        Duration::from_millis(1500),
    )
    .unwrap()
    .with_max_retries(2);

    let records = tokio::time::timeout(Duration::from_millis(1500), source.fetch_redirects())
        .await
        .expect("fetch exceeded its budget")
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
