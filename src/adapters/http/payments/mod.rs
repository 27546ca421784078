//! HTTP adapter for direct payment operations.
//!
//! - `POST /api/payments` - Charge a billing key immediately
//! - `POST /api/payments/cancel` - Cancel a completed payment
//!
//! Neither endpoint writes to the ledger.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{cancel_payment, charge_billing_key, PaymentApiError};
pub use routes::payment_routes;
