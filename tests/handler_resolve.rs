use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use site_links::api::handlers::resolve_handler;

fn server() -> TestServer {
    let app = Router::new().route("/api/links/resolve", post(resolve_handler));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_resolve_internal_link() {
    let response = server()
        .post("/api/links/resolve")
        .json(&json!({
            "internal": { "documentType": "post", "slug": "hello-world" }
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "href": "/hello-world",
        "target": "_self",
        "confirmationPolicy": "none"
    }));
}

#[tokio::test]
async fn test_resolve_cms_shape() {
    let response = server()
        .post("/api/links/resolve")
        .json(&json!({
            "internalLink": { "_type": "topic", "slug": { "current": "savings" } },
            "externalLink": { "url": "https://ignored.example" }
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["href"], "/savings/1");
}

#[tokio::test]
async fn test_resolve_external_new_tab_with_warning() {
    let response = server()
        .post("/api/links/resolve")
        .json(&json!({
            "externalLink": {
                "url": "https://x.com",
                "newTab": true,
                "leaveAlert": true
            }
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "href": "https://x.com",
        "target": "_blank",
        "confirmationPolicy": "leavingSiteWarning",
        "rel": "noopener noreferrer"
    }));
}

#[tokio::test]
async fn test_resolve_one_off_mailto() {
    let response = server()
        .post("/api/links/resolve")
        .json(&json!({
            "externalOneOff": { "url": "mailto:info@example.com" }
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["href"], "mailto:info@example.com");
    // The email prompt comes from the navigation guard, not the resolver
    assert_eq!(json["confirmationPolicy"], "none");
    assert_eq!(json["target"], "_self");
}

#[tokio::test]
async fn test_resolve_empty_body_defaults_to_root() {
    let response = server().post("/api/links/resolve").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "href": "/",
        "target": "_self",
        "confirmationPolicy": "none"
    }));
}

#[tokio::test]
async fn test_resolve_malformed_body_defaults_to_root() {
    let response = server()
        .post("/api/links/resolve")
        .text("{not json")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["href"], "/");
}
