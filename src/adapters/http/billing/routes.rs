//! Axum routes for the PortOne webhook.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::handle_portone_webhook;

/// - `POST /portone` - PortOne webhook (mounted under `/api`)
pub fn billing_routes() -> Router<AppState> {
    Router::new().route("/portone", post(handle_portone_webhook))
}
