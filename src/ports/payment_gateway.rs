//! Payment gateway port for recurring billing.
//!
//! Covers the subset of the gateway used by subscriptions: payment lookup,
//! future-charge scheduling and cancellation, and direct billing-key
//! charges.
//!
//! # Design
//!
//! - **Explicit configuration check**: callers ask `ensure_configured` before
//!   starting a workflow, so a missing secret never costs a network call
//! - **Raw passthrough** for direct charges, which echo the gateway body

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::billing::BillingError;
use crate::domain::foundation::{ScheduleId, Timestamp};

/// Port for the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Fails with `NotConfigured` when no credential is available.
    fn ensure_configured(&self) -> Result<(), GatewayError>;

    /// Fetch a payment by its gateway id.
    async fn fetch_payment(&self, payment_id: &str) -> Result<PaymentInfo, GatewayError>;

    /// Register a future charge keyed by `schedule_id`, firing at `time_to_pay`.
    ///
    /// The gateway creates the future payment under `schedule_id`, so the
    /// same value later shows up as the listed entry's `payment_id`.
    async fn schedule_payment(
        &self,
        schedule_id: &ScheduleId,
        payment: &PaymentInfo,
        time_to_pay: Timestamp,
    ) -> Result<(), GatewayError>;

    /// List future charges for a billing key within one day of `around`.
    async fn list_scheduled_payments(
        &self,
        billing_key: &str,
        around: Timestamp,
    ) -> Result<Vec<ScheduledPayment>, GatewayError>;

    /// Delete one future charge by its gateway schedule id.
    async fn cancel_scheduled_payment(&self, schedule_id: &str) -> Result<(), GatewayError>;

    /// Charge a stored billing key immediately. Returns the raw gateway body.
    async fn charge_billing_key(
        &self,
        payment_id: &str,
        charge: &BillingKeyCharge,
    ) -> Result<serde_json::Value, GatewayError>;

    /// Cancel a completed payment. Returns the raw gateway body.
    async fn cancel_payment(
        &self,
        payment_id: &str,
        reason: Option<&str>,
    ) -> Result<serde_json::Value, GatewayError>;
}

/// Payment details as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Gateway payment id.
    pub id: String,

    /// Stored billing credential, present for subscription payments.
    pub billing_key: Option<String>,

    pub order_name: String,

    /// Total amount in minor currency units.
    pub amount: i64,

    pub customer_id: String,
}

/// A pending future charge at the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    /// Gateway schedule id (what `cancel_scheduled_payment` takes).
    pub schedule_id: String,

    /// Payment id the schedule will create when it fires.
    pub payment_id: String,
}

/// Parameters for an immediate billing-key charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingKeyCharge {
    pub billing_key: String,
    pub order_name: String,
    pub amount: i64,
    pub customer_id: String,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub code: GatewayErrorCode,
    pub message: String,

    /// Upstream HTTP status, when the gateway answered.
    pub http_status: Option<u16>,

    /// Upstream response body, when the gateway answered.
    pub body: Option<String>,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
            body: None,
        }
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NotConfigured, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidResponse, message)
    }

    /// Non-2xx answer from the gateway.
    pub fn upstream(status: u16, body: impl Into<String>, context: &str) -> Self {
        let code = if status == 404 {
            GatewayErrorCode::NotFound
        } else {
            GatewayErrorCode::ProviderError
        };
        Self {
            code,
            message: format!("{} failed with status {}", context, status),
            http_status: Some(status),
            body: Some(body.into()),
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Categories of gateway errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayErrorCode {
    /// Credential missing; no request was sent.
    NotConfigured,
    /// Transport failure before a response arrived.
    NetworkError,
    /// Gateway answered with a non-2xx status.
    ProviderError,
    /// Gateway answered 2xx with a body we could not read.
    InvalidResponse,
    /// Gateway answered 404.
    NotFound,
}

impl fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GatewayErrorCode::NotConfigured => "not_configured",
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::ProviderError => "provider_error",
            GatewayErrorCode::InvalidResponse => "invalid_response",
            GatewayErrorCode::NotFound => "not_found",
        };
        write!(f, "{}", s)
    }
}

impl From<GatewayError> for BillingError {
    fn from(err: GatewayError) -> Self {
        match err.code {
            GatewayErrorCode::NotConfigured => BillingError::Configuration(err.message),
            _ => BillingError::Gateway {
                status: err.http_status,
                message: err.message,
                body: err.body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_carries_status_and_body() {
        let err = GatewayError::upstream(502, "{\"message\":\"bad\"}", "fetch payment");
        assert_eq!(err.code, GatewayErrorCode::ProviderError);
        assert_eq!(err.http_status, Some(502));
        assert!(err.message.contains("502"));
    }

    #[test]
    fn upstream_404_is_not_found() {
        let err = GatewayError::upstream(404, "", "fetch payment");
        assert_eq!(err.code, GatewayErrorCode::NotFound);
    }

    #[test]
    fn not_configured_maps_to_configuration() {
        let err: BillingError = GatewayError::not_configured("secret missing").into();
        assert_eq!(err, BillingError::Configuration("secret missing".to_string()));
    }

    #[test]
    fn provider_error_maps_to_gateway() {
        let err: BillingError = GatewayError::upstream(400, "oops", "schedule").into();
        match err {
            BillingError::Gateway { status, body, .. } => {
                assert_eq!(status, Some(400));
                assert_eq!(body.as_deref(), Some("oops"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn network_error_has_no_status() {
        let err: BillingError = GatewayError::network("connection refused").into();
        assert!(matches!(err, BillingError::Gateway { status: None, .. }));
    }
}
