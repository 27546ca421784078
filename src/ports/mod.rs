//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - Payment lookup, future-charge scheduling, direct charges
//! - `LedgerStore` - Append-only payment ledger
//! - `MagazineRepository` - Article catalog persistence

mod ledger_store;
mod magazine_repository;
mod payment_gateway;

pub use ledger_store::LedgerStore;
pub use magazine_repository::MagazineRepository;
pub use payment_gateway::{
    BillingKeyCharge, GatewayError, GatewayErrorCode, PaymentGateway, PaymentInfo,
    ScheduledPayment,
};
