//! Direct payment handlers (no ledger writes).

mod cancel_payment;
mod charge_billing_key;
mod errors;

pub use cancel_payment::{CancelPaymentCommand, CancelPaymentHandler, CancelPaymentResult};
pub use charge_billing_key::{
    generate_payment_id, ChargeBillingKeyCommand, ChargeBillingKeyHandler, ChargeBillingKeyResult,
};
pub use errors::{DirectPaymentError, FIELD_NOT_POSITIVE, FIELD_OK, FIELD_REQUIRED};
