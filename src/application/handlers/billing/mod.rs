//! Subscription billing handlers.

mod handle_portone_webhook;

pub use handle_portone_webhook::{HandlePortOneWebhookCommand, HandlePortOneWebhookHandler};
