//! ChargeBillingKeyHandler - Immediate charge against a stored billing key.
//!
//! Nothing is written to the ledger; the gateway response is passed back
//! to the caller unchanged.

use std::sync::Arc;

use rand::Rng;

use super::errors::{DirectPaymentError, FieldReport};
use crate::domain::foundation::Timestamp;
use crate::ports::{BillingKeyCharge, PaymentGateway};

const ID_SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Command to charge a billing key.
#[derive(Debug, Clone, Default)]
pub struct ChargeBillingKeyCommand {
    pub billing_key: Option<String>,
    pub order_name: Option<String>,
    pub amount: Option<i64>,
    pub customer_id: Option<String>,
}

/// Result of a successful charge.
#[derive(Debug, Clone)]
pub struct ChargeBillingKeyResult {
    pub payment_id: String,
    pub data: serde_json::Value,
}

pub struct ChargeBillingKeyHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl ChargeBillingKeyHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: ChargeBillingKeyCommand,
    ) -> Result<ChargeBillingKeyResult, DirectPaymentError> {
        let mut report = FieldReport::default();
        let billing_key = report.text("billingKey", cmd.billing_key);
        let order_name = report.text("orderName", cmd.order_name);
        let amount = report.positive("amount", cmd.amount);
        let customer_id = report.text("customerId", cmd.customer_id);

        let (Some(billing_key), Some(order_name), Some(amount), Some(customer_id)) =
            (billing_key, order_name, amount, customer_id)
        else {
            return Err(report.into_error());
        };

        self.gateway.ensure_configured()?;

        let payment_id = generate_payment_id(Timestamp::now(), &mut rand::thread_rng());
        let charge = BillingKeyCharge {
            billing_key,
            order_name,
            amount,
            customer_id,
        };

        let data = self
            .gateway
            .charge_billing_key(&payment_id, &charge)
            .await
            .map_err(|e| {
                tracing::error!(payment_id = %payment_id, error = %e, "Billing key charge failed");
                DirectPaymentError::from(e)
            })?;

        tracing::info!(payment_id = %payment_id, amount, "Charged billing key");
        Ok(ChargeBillingKeyResult { payment_id, data })
    }
}

/// `payment_<unix millis>_<7 base36 chars>`
pub fn generate_payment_id<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();
    format!("payment_{}_{}", now.as_unix_millis(), suffix)
}
