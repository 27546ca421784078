//! HTTP DTOs for the PortOne webhook.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::HandlePortOneWebhookCommand;
use crate::domain::billing::WebhookOutcome;

/// Webhook body. Both fields are optional here so that a missing field is
/// reported as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortOneWebhookRequest {
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<PortOneWebhookRequest> for HandlePortOneWebhookCommand {
    fn from(req: PortOneWebhookRequest) -> Self {
        HandlePortOneWebhookCommand {
            payment_id: req.payment_id,
            status: req.status,
        }
    }
}

/// `200` body: `{ success: true, message, checklist }`.
#[derive(Debug, Clone, Serialize)]
pub struct PortOneWebhookResponse {
    pub success: bool,
    pub message: String,
    pub checklist: Vec<String>,
}

impl From<WebhookOutcome> for PortOneWebhookResponse {
    fn from(outcome: WebhookOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message,
            checklist: outcome.audit_trail.into_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::AuditTrail;
    use serde_json::json;

    #[test]
    fn request_tolerates_missing_fields() {
        let req: PortOneWebhookRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.payment_id.is_none());
        assert!(req.status.is_none());
    }

    #[test]
    fn response_exposes_trail_as_checklist() {
        let mut trail = AuditTrail::new();
        trail.record("fetched payment");
        let response = PortOneWebhookResponse::from(WebhookOutcome::processed("ok", trail));
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "success": true, "message": "ok", "checklist": ["fetched payment"] })
        );
    }
}
