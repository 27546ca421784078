//! HTTP adapter for the PortOne webhook.
//!
//! - `POST /api/portone` - Handle a `Paid` or `Cancelled` notification

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{handle_portone_webhook, WebhookApiError};
pub use routes::billing_routes;
