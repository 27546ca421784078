//! Top-level API router.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use super::billing::billing_routes;
use super::magazine::magazine_routes;
use super::payments::payment_routes;
use super::state::AppState;

/// Every endpoint under `/api`, with state applied.
///
/// Middleware (tracing, timeout, CORS) is layered by the caller.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(billing_routes())
        .nest("/payments", payment_routes())
        .nest("/magazines", magazine_routes());

    Router::new().nest("/api", api).with_state(state)
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
