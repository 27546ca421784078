//! PortOne payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for PortOne V2, including:
//! - Payment lookup
//! - Future-charge (schedule) registration, lookup and cancellation
//! - Immediate billing-key charges and payment cancellation
//!
//! # Security
//!
//! - The API secret is held as `secrecy::SecretString` and never logged
//!
//! # Configuration
//!
//! - `MAGAZINE__PORTONE__API_SECRET`: V2 API secret
//! - `MAGAZINE__PORTONE__API_BASE_URL`: override for tests or proxies

mod api_types;
mod mock_gateway;
mod portone_client;

pub use mock_gateway::{MethodCall, MockPaymentGateway, ScheduleRegistration};
pub use portone_client::{
    PortOneConfig, PortOneGateway, DEFAULT_API_BASE_URL, DEFAULT_CANCEL_REASON,
};
