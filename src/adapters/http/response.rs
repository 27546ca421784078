//! JSON envelope shared by every endpoint.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Failure body: `{ success: false, error, details? }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Request body or query string that could not be decoded.
#[derive(Debug)]
pub struct MalformedRequest(String);

impl From<JsonRejection> for MalformedRequest {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection.body_text())
    }
}

impl From<QueryRejection> for MalformedRequest {
    fn from(rejection: QueryRejection) -> Self {
        Self(rejection.body_text())
    }
}

impl IntoResponse for MalformedRequest {
    fn into_response(self) -> Response {
        tracing::warn!(reason = %self.0, "Malformed request");
        ErrorResponse::new(format!("Malformed request: {}", self.0))
            .into_response_with(StatusCode::BAD_REQUEST)
    }
}

/// Upstream error bodies are echoed as JSON when they parse, as text otherwise.
pub fn upstream_body(body: Option<&str>) -> Value {
    match body {
        None => Value::Null,
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

/// Upstream status when it is a valid error status, 500 otherwise.
pub fn upstream_status(status: Option<u16>) -> StatusCode {
    status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_omits_missing_details() {
        let value = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(value, json!({ "success": false, "error": "boom" }));
    }

    #[test]
    fn upstream_body_parses_json_or_keeps_text() {
        assert_eq!(upstream_body(Some(r#"{"type":"X"}"#)), json!({ "type": "X" }));
        assert_eq!(upstream_body(Some("gateway down")), json!("gateway down"));
        assert_eq!(upstream_body(None), Value::Null);
    }

    #[test]
    fn upstream_status_falls_back_to_500() {
        assert_eq!(upstream_status(Some(404)), StatusCode::NOT_FOUND);
        assert_eq!(upstream_status(Some(200)), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream_status(None), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
