//! Axum routes for direct payment endpoints.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::{cancel_payment, charge_billing_key};

/// - `POST /` - Charge a billing key
/// - `POST /cancel` - Cancel a payment
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(charge_billing_key))
        .route("/cancel", post(cancel_payment))
}
