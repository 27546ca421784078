//! CancelPaymentHandler - Cancels a completed payment at the gateway.

use std::sync::Arc;

use super::errors::{DirectPaymentError, FieldReport};
use crate::ports::PaymentGateway;

#[derive(Debug, Clone, Default)]
pub struct CancelPaymentCommand {
    pub transaction_key: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CancelPaymentResult {
    pub data: serde_json::Value,
}

pub struct CancelPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CancelPaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CancelPaymentCommand,
    ) -> Result<CancelPaymentResult, DirectPaymentError> {
        let mut report = FieldReport::default();
        let Some(transaction_key) = report.text("transactionKey", cmd.transaction_key) else {
            return Err(report.into_error());
        };

        self.gateway.ensure_configured()?;

        let data = self
            .gateway
            .cancel_payment(&transaction_key, cmd.reason.as_deref())
            .await
            .map_err(|e| {
                tracing::error!(
                    transaction_key = %transaction_key,
                    error = %e,
                    "Payment cancellation failed"
                );
                DirectPaymentError::from(e)
            })?;

        tracing::info!(transaction_key = %transaction_key, "Cancelled payment");
        Ok(CancelPaymentResult { data })
    }
}
