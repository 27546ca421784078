//! Billing error taxonomy.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | Configuration | 500 |
//! | Gateway | 500 |
//! | Store | 500 |
//! | NotFound | 500 |

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ValidationError};

/// Errors surfaced by billing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Missing or malformed input. No side effects happened.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// A required credential or setting is absent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The payment gateway answered with an error or could not be reached.
    #[error("Gateway error: {message}")]
    Gateway {
        status: Option<u16>,
        message: String,
        body: Option<String>,
    },

    /// The ledger rejected a read or write.
    #[error("Store error: {0}")]
    Store(String),

    /// An expected ledger row or gateway schedule is absent.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl BillingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        BillingError::Configuration(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        BillingError::Store(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        BillingError::NotFound(message.into())
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            BillingError::Validation { .. } => "VALIDATION_ERROR",
            BillingError::Configuration(_) => "CONFIGURATION_ERROR",
            BillingError::Gateway { .. } => "GATEWAY_ERROR",
            BillingError::Store(_) => "STORE_ERROR",
            BillingError::NotFound(_) => "NOT_FOUND",
        }
    }

    /// True when the caller sent a bad request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, BillingError::Validation { .. })
    }
}

impl From<ValidationError> for BillingError {
    fn from(err: ValidationError) -> Self {
        BillingError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        if err.code.is_not_found() {
            BillingError::NotFound(err.message)
        } else {
            BillingError::Store(err.message)
        }
    }
}

/// Steps of the webhook workflow, used to label failures and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookStep {
    ValidateRequest,
    CheckConfiguration,
    FetchPayment,
    InsertCharge,
    RegisterSchedule,
    LookupCharge,
    InsertReversal,
    RefetchPayment,
    ListSchedules,
    MatchSchedule,
    CancelSchedule,
}

impl WebhookStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookStep::ValidateRequest => "validate request",
            WebhookStep::CheckConfiguration => "check configuration",
            WebhookStep::FetchPayment => "fetch payment",
            WebhookStep::InsertCharge => "insert charge row",
            WebhookStep::RegisterSchedule => "register next payment",
            WebhookStep::LookupCharge => "look up charge row",
            WebhookStep::InsertReversal => "insert reversal row",
            WebhookStep::RefetchPayment => "re-fetch payment",
            WebhookStep::ListSchedules => "list scheduled payments",
            WebhookStep::MatchSchedule => "match scheduled payment",
            WebhookStep::CancelSchedule => "cancel scheduled payment",
        }
    }
}

impl fmt::Display for WebhookStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A webhook failure tagged with the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct WebhookFailure {
    pub step: WebhookStep,
    pub error: BillingError,
}

impl WebhookFailure {
    pub fn new(step: WebhookStep, error: impl Into<BillingError>) -> Self {
        Self {
            step,
            error: error.into(),
        }
    }
}

impl fmt::Display for WebhookFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn only_validation_is_a_client_error() {
        assert!(BillingError::validation("status", "bad").is_client_error());
        assert!(!BillingError::configuration("missing").is_client_error());
        assert!(!BillingError::not_found("row").is_client_error());
        assert!(!BillingError::store("down").is_client_error());
    }

    #[test]
    fn domain_not_found_maps_to_not_found() {
        let err: BillingError =
            DomainError::new(ErrorCode::PaymentRecordNotFound, "no row for pay_1").into();
        assert_eq!(err, BillingError::NotFound("no row for pay_1".to_string()));
    }

    #[test]
    fn other_domain_errors_map_to_store() {
        let err: BillingError = DomainError::database("connection reset").into();
        assert!(matches!(err, BillingError::Store(_)));
        assert_eq!(err.code(), "STORE_ERROR");
    }

    #[test]
    fn validation_error_keeps_field() {
        let err: BillingError = ValidationError::empty_field("payment_id").into();
        match err {
            BillingError::Validation { field, .. } => assert_eq!(field, "payment_id"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn failure_display_names_the_step() {
        let failure = WebhookFailure::new(
            WebhookStep::MatchSchedule,
            BillingError::not_found("schedule for sched-1"),
        );
        assert_eq!(
            failure.to_string(),
            "match scheduled payment failed: Not found: schedule for sched-1"
        );
    }

    #[test]
    fn every_step_has_a_distinct_label() {
        let steps = [
            WebhookStep::ValidateRequest,
            WebhookStep::CheckConfiguration,
            WebhookStep::FetchPayment,
            WebhookStep::InsertCharge,
            WebhookStep::RegisterSchedule,
            WebhookStep::LookupCharge,
            WebhookStep::InsertReversal,
            WebhookStep::RefetchPayment,
            WebhookStep::ListSchedules,
            WebhookStep::MatchSchedule,
            WebhookStep::CancelSchedule,
        ];
        let labels: std::collections::HashSet<_> = steps.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels.len(), steps.len());
    }
}
