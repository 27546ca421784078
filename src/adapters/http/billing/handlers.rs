//! HTTP handler for the PortOne webhook.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::billing::{BillingError, WebhookFailure};

use super::super::response::{upstream_body, ErrorResponse, MalformedRequest};
use super::super::state::AppState;
use super::dto::{PortOneWebhookRequest, PortOneWebhookResponse};

/// POST /api/portone - Process a subscription payment notification
pub async fn handle_portone_webhook(
    State(state): State<AppState>,
    payload: Result<Json<PortOneWebhookRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(request) = payload.map_err(|e| MalformedRequest::from(e).into_response())?;

    let outcome = state
        .webhook_handler()
        .handle(request.into())
        .await
        .map_err(|failure| WebhookApiError(failure).into_response())?;

    Ok(Json(PortOneWebhookResponse::from(outcome)).into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper mapping webhook failures to the JSON envelope.
#[derive(Debug)]
pub struct WebhookApiError(pub WebhookFailure);

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let failure = self.0;
        let status = if failure.error.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = match &failure.error {
            BillingError::Gateway {
                status: upstream,
                body,
                ..
            } => ErrorResponse::new(failure.to_string()).with_details(json!({
                "status": upstream,
                "body": upstream_body(body.as_deref()),
            })),
            _ => ErrorResponse::new(failure.to_string()),
        };

        body.into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::WebhookStep;

    #[test]
    fn validation_failure_maps_to_400() {
        let failure = WebhookFailure::new(
            WebhookStep::ValidateRequest,
            BillingError::validation("status", "unknown status"),
        );
        let response = WebhookApiError(failure).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn downstream_failures_map_to_500() {
        for error in [
            BillingError::configuration("missing secret"),
            BillingError::store("insert failed"),
            BillingError::not_found("no charge"),
            BillingError::Gateway {
                status: Some(409),
                message: "conflict".to_string(),
                body: None,
            },
        ] {
            let failure = WebhookFailure::new(WebhookStep::RegisterSchedule, error);
            let response = WebhookApiError(failure).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
