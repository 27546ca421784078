//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::billing::{HandlePortOneWebhookCommand, HandlePortOneWebhookHandler};
pub use handlers::magazine::{
    GetMagazineHandler, GetMagazineQuery, ListMagazinesHandler, ListMagazinesQuery,
    SubmitMagazineCommand, SubmitMagazineHandler,
};
pub use handlers::payments::{
    CancelPaymentCommand, CancelPaymentHandler, ChargeBillingKeyCommand, ChargeBillingKeyHandler,
    DirectPaymentError,
};
