//! HTTP handlers for direct payment endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::handlers::payments::DirectPaymentError;

use super::super::response::{upstream_body, upstream_status, ErrorResponse, MalformedRequest};
use super::super::state::AppState;
use super::dto::{CancelRequest, CancelResponse, ChargeRequest, ChargeResponse};

/// POST /api/payments - Charge a stored billing key now
pub async fn charge_billing_key(
    State(state): State<AppState>,
    payload: Result<Json<ChargeRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(request) = payload.map_err(|e| MalformedRequest::from(e).into_response())?;

    let result = state
        .charge_handler()
        .handle(request.into())
        .await
        .map_err(|e| PaymentApiError(e).into_response())?;

    Ok(Json(ChargeResponse::from(result)).into_response())
}

/// POST /api/payments/cancel - Cancel a completed payment
pub async fn cancel_payment(
    State(state): State<AppState>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(request) = payload.map_err(|e| MalformedRequest::from(e).into_response())?;

    let result = state
        .cancel_payment_handler()
        .handle(request.into())
        .await
        .map_err(|e| PaymentApiError(e).into_response())?;

    Ok(Json(CancelResponse::from(result)).into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct PaymentApiError(pub DirectPaymentError);

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        match self.0 {
            DirectPaymentError::MissingFields { fields } => ErrorResponse::new(message)
                .with_details(json!(fields))
                .into_response_with(StatusCode::BAD_REQUEST),
            DirectPaymentError::Configuration(_) => {
                ErrorResponse::new(message).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
            DirectPaymentError::Gateway { status, body, .. } => ErrorResponse::new(message)
                .with_details(upstream_body(body.as_deref()))
                .into_response_with(upstream_status(status)),
        }
    }
}
