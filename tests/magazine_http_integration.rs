//! Integration tests for the magazine catalog endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use magazine_subscriptions::adapters::http::{api_router, AppState};
use magazine_subscriptions::adapters::memory::{InMemoryLedgerStore, InMemoryMagazineRepository};
use magazine_subscriptions::adapters::portone::MockPaymentGateway;

fn router() -> Router {
    api_router(AppState::new(
        Arc::new(MockPaymentGateway::new()),
        Arc::new(InMemoryLedgerStore::new()),
        Arc::new(InMemoryMagazineRepository::new()),
    ))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn submit(body: Value) -> Request<Body> {
    Request::post("/api/magazines")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn article(title: &str) -> Value {
    json!({
        "category": "tech",
        "title": title,
        "description": "A short summary",
        "content": "Body text",
        "tags": ["rust", "  ", " web "]
    })
}

#[tokio::test]
async fn submitted_article_can_be_fetched() {
    let router = router();

    let (status, created) = send(&router, submit(article("Hello"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(&router, get(&format!("/api/magazines/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["magazine"]["title"], "Hello");
    assert_eq!(body["magazine"]["content"], "Body text");
    assert_eq!(body["magazine"]["tags"], json!(["rust", "web"]));
    assert!(body["magazine"]["image_url"].is_null());
}

#[tokio::test]
async fn list_returns_newest_first_and_honours_limit() {
    let router = router();
    for title in ["first", "second", "third"] {
        send(&router, submit(article(title))).await;
    }

    let (status, body) = send(&router, get("/api/magazines?limit=2")).await;

    assert_eq!(status, StatusCode::OK);
    let magazines = body["magazines"].as_array().unwrap();
    assert_eq!(magazines.len(), 2);
    assert_eq!(magazines[0]["title"], "third");
    assert!(magazines[0].get("content").is_none());
}

#[tokio::test]
async fn blank_required_field_is_rejected() {
    let router = router();
    let mut body = article("x");
    body["title"] = json!("   ");

    let (status, response) = send(&router, submit(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert_eq!(response["details"]["field"], "title");
}

#[tokio::test]
async fn unknown_article_is_404() {
    let (status, body) = send(
        &router(),
        get("/api/magazines/6f1c2b1e-8c3a-4e5b-9d2f-0a1b2c3d4e5f"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn malformed_id_is_400() {
    let (status, _) = send(&router(), get("/api/magazines/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_limit_is_400() {
    let (status, _) = send(&router(), get("/api/magazines?limit=lots")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
