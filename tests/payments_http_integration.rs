//! Integration tests for the direct payment endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use magazine_subscriptions::adapters::http::{api_router, AppState};
use magazine_subscriptions::adapters::memory::{InMemoryLedgerStore, InMemoryMagazineRepository};
use magazine_subscriptions::adapters::portone::MockPaymentGateway;
use magazine_subscriptions::ports::GatewayError;

fn router(gateway: &MockPaymentGateway, ledger: Arc<InMemoryLedgerStore>) -> Router {
    api_router(AppState::new(
        Arc::new(gateway.clone()),
        ledger,
        Arc::new(InMemoryMagazineRepository::new()),
    ))
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn charge_body() -> Value {
    json!({
        "billingKey": "bk_1",
        "orderName": "Monthly plan",
        "amount": 9900,
        "customer": { "id": "c1" }
    })
}

// =============================================================================
// POST /api/payments
// =============================================================================

#[tokio::test]
async fn charge_returns_generated_payment_id_and_gateway_data() {
    let gateway = MockPaymentGateway::new();
    gateway.set_charge_response(json!({ "payment": { "pgTxId": "pg_42" } }));
    let ledger = Arc::new(InMemoryLedgerStore::new());

    let (status, body) = post(
        router(&gateway, ledger.clone()),
        "/api/payments",
        charge_body(),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["success"], true);
    assert!(body["paymentId"].as_str().unwrap().starts_with("payment_"));
    assert_eq!(body["data"]["payment"]["pgTxId"], "pg_42");
    assert_eq!(gateway.call_count("charge_billing_key"), 1);
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn charge_reports_every_field() {
    let gateway = MockPaymentGateway::new();

    let (status, body) = post(
        router(&gateway, Arc::new(InMemoryLedgerStore::new())),
        "/api/payments",
        json!({ "billingKey": "bk_1", "amount": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["details"]["billingKey"], "ok");
    assert_eq!(body["details"]["orderName"], "required");
    assert_eq!(body["details"]["amount"], "must be positive");
    assert_eq!(body["details"]["customerId"], "required");
    assert_eq!(gateway.total_calls(), 0);
}

#[tokio::test]
async fn charge_without_secret_is_a_configuration_error() {
    let gateway = MockPaymentGateway::unconfigured();

    let (status, body) = post(
        router(&gateway, Arc::new(InMemoryLedgerStore::new())),
        "/api/payments",
        charge_body(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Configuration"));
    assert_eq!(gateway.total_calls(), 0);
}

#[tokio::test]
async fn charge_echoes_upstream_status_and_body() {
    let gateway = MockPaymentGateway::new();
    gateway.set_method_error(
        "charge_billing_key",
        GatewayError::upstream(402, r#"{"type":"CARD_DECLINED"}"#, "billing key charge"),
    );

    let (status, body) = post(
        router(&gateway, Arc::new(InMemoryLedgerStore::new())),
        "/api/payments",
        charge_body(),
    )
    .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["success"], false);
    assert_eq!(body["details"]["type"], "CARD_DECLINED");
}

// =============================================================================
// POST /api/payments/cancel
// =============================================================================

#[tokio::test]
async fn cancel_returns_gateway_data() {
    let gateway = MockPaymentGateway::new();

    let (status, body) = post(
        router(&gateway, Arc::new(InMemoryLedgerStore::new())),
        "/api/payments/cancel",
        json!({ "transactionKey": "pay_1" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["cancellation"]["reason"], "no reason provided");
    assert_eq!(gateway.calls()[0].args[0], "pay_1");
}

#[tokio::test]
async fn cancel_requires_transaction_key() {
    let gateway = MockPaymentGateway::new();

    let (status, body) = post(
        router(&gateway, Arc::new(InMemoryLedgerStore::new())),
        "/api/payments/cancel",
        json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["transactionKey"], "required");
    assert_eq!(gateway.total_calls(), 0);
}
