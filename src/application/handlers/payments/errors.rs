//! Errors for direct payment operations.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::ports::{GatewayError, GatewayErrorCode};

/// Outcome of checking one request field.
pub const FIELD_OK: &str = "ok";
pub const FIELD_REQUIRED: &str = "required";
pub const FIELD_NOT_POSITIVE: &str = "must be positive";

/// Errors from direct charge and cancel requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectPaymentError {
    /// One or more required fields are missing; `fields` reports every field.
    #[error("Missing required fields")]
    MissingFields {
        fields: BTreeMap<&'static str, &'static str>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Gateway failure; `status` is the upstream HTTP status when there was one.
    #[error("Gateway error: {message}")]
    Gateway {
        status: Option<u16>,
        message: String,
        body: Option<String>,
    },
}

impl From<GatewayError> for DirectPaymentError {
    fn from(err: GatewayError) -> Self {
        match err.code {
            GatewayErrorCode::NotConfigured => DirectPaymentError::Configuration(err.message),
            _ => DirectPaymentError::Gateway {
                status: err.http_status,
                message: err.message,
                body: err.body,
            },
        }
    }
}

/// Records the state of every checked field so a rejection can list them all.
#[derive(Debug, Default)]
pub(super) struct FieldReport {
    fields: BTreeMap<&'static str, &'static str>,
}

impl FieldReport {
    pub(super) fn text(&mut self, name: &'static str, value: Option<String>) -> Option<String> {
        let value = value.filter(|v| !v.trim().is_empty());
        self.mark(name, if value.is_some() { FIELD_OK } else { FIELD_REQUIRED });
        value
    }

    pub(super) fn positive(&mut self, name: &'static str, value: Option<i64>) -> Option<i64> {
        match value {
            None => {
                self.mark(name, FIELD_REQUIRED);
                None
            }
            Some(v) if v <= 0 => {
                self.mark(name, FIELD_NOT_POSITIVE);
                None
            }
            Some(v) => {
                self.mark(name, FIELD_OK);
                Some(v)
            }
        }
    }

    fn mark(&mut self, name: &'static str, state: &'static str) {
        self.fields.insert(name, state);
    }

    pub(super) fn into_error(self) -> DirectPaymentError {
        DirectPaymentError::MissingFields {
            fields: self.fields,
        }
    }
}
