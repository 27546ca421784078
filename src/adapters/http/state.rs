//! Shared application state for the axum router.

use std::sync::Arc;

use crate::application::handlers::billing::HandlePortOneWebhookHandler;
use crate::application::handlers::magazine::{
    GetMagazineHandler, ListMagazinesHandler, SubmitMagazineHandler,
};
use crate::application::handlers::payments::{CancelPaymentHandler, ChargeBillingKeyHandler};
use crate::ports::{LedgerStore, MagazineRepository, PaymentGateway};

/// Dependencies shared by every request; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub ledger: Arc<dyn LedgerStore>,
    pub magazines: Arc<dyn MagazineRepository>,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        ledger: Arc<dyn LedgerStore>,
        magazines: Arc<dyn MagazineRepository>,
    ) -> Self {
        Self {
            gateway,
            ledger,
            magazines,
        }
    }

    pub fn webhook_handler(&self) -> HandlePortOneWebhookHandler {
        HandlePortOneWebhookHandler::new(self.gateway.clone(), self.ledger.clone())
    }

    pub fn charge_handler(&self) -> ChargeBillingKeyHandler {
        ChargeBillingKeyHandler::new(self.gateway.clone())
    }

    pub fn cancel_payment_handler(&self) -> CancelPaymentHandler {
        CancelPaymentHandler::new(self.gateway.clone())
    }

    pub fn list_magazines_handler(&self) -> ListMagazinesHandler {
        ListMagazinesHandler::new(self.magazines.clone())
    }

    pub fn get_magazine_handler(&self) -> GetMagazineHandler {
        GetMagazineHandler::new(self.magazines.clone())
    }

    pub fn submit_magazine_handler(&self) -> SubmitMagazineHandler {
        SubmitMagazineHandler::new(self.magazines.clone())
    }
}
