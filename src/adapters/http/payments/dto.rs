//! HTTP DTOs for direct payment endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::payments::{
    CancelPaymentCommand, CancelPaymentResult, ChargeBillingKeyCommand, ChargeBillingKeyResult,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    #[serde(default)]
    pub billing_key: Option<String>,
    #[serde(default)]
    pub order_name: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub customer: Option<CustomerRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerRequest {
    #[serde(default)]
    pub id: Option<String>,
}

impl From<ChargeRequest> for ChargeBillingKeyCommand {
    fn from(req: ChargeRequest) -> Self {
        ChargeBillingKeyCommand {
            billing_key: req.billing_key,
            order_name: req.order_name,
            amount: req.amount,
            customer_id: req.customer.and_then(|c| c.id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    #[serde(default)]
    pub transaction_key: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<CancelRequest> for CancelPaymentCommand {
    fn from(req: CancelRequest) -> Self {
        CancelPaymentCommand {
            transaction_key: req.transaction_key,
            reason: req.reason,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResponse {
    pub success: bool,
    pub payment_id: String,
    /// Raw gateway response
    pub data: Value,
}

impl From<ChargeBillingKeyResult> for ChargeResponse {
    fn from(result: ChargeBillingKeyResult) -> Self {
        Self {
            success: true,
            payment_id: result.payment_id,
            data: result.data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelResponse {
    pub success: bool,
    pub data: Value,
}

impl From<CancelPaymentResult> for CancelResponse {
    fn from(result: CancelPaymentResult) -> Self {
        Self {
            success: true,
            data: result.data,
        }
    }
}
