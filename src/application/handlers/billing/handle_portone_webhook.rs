//! HandlePortOneWebhookHandler - Command handler for PortOne payment notifications.
//!
//! A `Paid` notification opens a billing period, records the charge and
//! registers the next charge at the gateway. A `Cancelled` notification
//! records the reversal and removes the pending next charge.
//!
//! Steps run strictly in order and the first failure aborts the rest.
//! Nothing is rolled back: a ledger row written before a failing gateway
//! call stays in place.

use std::sync::Arc;

use crate::domain::billing::{
    AuditTrail, BillingError, BillingPeriod, NotificationStatus, PaymentNotification,
    PaymentRecord, WebhookFailure, WebhookOutcome, WebhookStep,
};
use crate::domain::foundation::{ScheduleId, Timestamp};
use crate::ports::{LedgerStore, PaymentGateway};

/// Command carrying the raw webhook fields.
#[derive(Debug, Clone, Default)]
pub struct HandlePortOneWebhookCommand {
    pub payment_id: Option<String>,
    pub status: Option<String>,
}

/// Handler for PortOne subscription webhooks.
pub struct HandlePortOneWebhookHandler {
    gateway: Arc<dyn PaymentGateway>,
    ledger: Arc<dyn LedgerStore>,
}

impl HandlePortOneWebhookHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, ledger: Arc<dyn LedgerStore>) -> Self {
        Self { gateway, ledger }
    }

    pub async fn handle(
        &self,
        cmd: HandlePortOneWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookFailure> {
        let notification =
            PaymentNotification::parse(cmd.payment_id.as_deref(), cmd.status.as_deref())
                .map_err(|e| {
                    tracing::warn!(error = %e, "Rejected PortOne webhook");
                    WebhookFailure::new(WebhookStep::ValidateRequest, e)
                })?;

        let payment_id = notification.payment_id.as_str();

        self.gateway.ensure_configured().map_err(|e| {
            tracing::error!(payment_id, error = %e, "Payment gateway is not configured");
            WebhookFailure::new(WebhookStep::CheckConfiguration, e)
        })?;

        tracing::info!(payment_id, status = %notification.status, "Processing PortOne webhook");

        let result = match notification.status {
            NotificationStatus::Paid => self.process_paid(payment_id).await,
            NotificationStatus::Cancelled => self.process_cancelled(payment_id).await,
        };

        if let Err(failure) = &result {
            tracing::error!(
                payment_id,
                step = %failure.step,
                error = %failure.error,
                "PortOne webhook failed"
            );
        }
        result
    }

    async fn process_paid(&self, payment_id: &str) -> Result<WebhookOutcome, WebhookFailure> {
        let mut trail = AuditTrail::new();

        // 1. Payment details
        let payment = self
            .gateway
            .fetch_payment(payment_id)
            .await
            .map_err(|e| WebhookFailure::new(WebhookStep::FetchPayment, e))?;
        trail.record(format!(
            "Fetched payment {} ({} for customer {})",
            payment.id, payment.amount, payment.customer_id
        ));

        // 2. Billing period
        let period = BillingPeriod::starting_at(Timestamp::now());
        trail.record(format!(
            "Computed billing period ending {} (grace until {}, next charge at {})",
            period.end_at, period.end_grace_at, period.next_schedule_at
        ));

        // 3. Next schedule id
        let schedule_id = ScheduleId::generate();
        trail.record(format!("Generated next schedule id {}", schedule_id));

        // 4. Charge row
        let record =
            PaymentRecord::charge(payment_id, payment.amount, &period, schedule_id.clone());
        self.ledger
            .insert_charge(&record)
            .await
            .map_err(|e| WebhookFailure::new(WebhookStep::InsertCharge, e))?;
        trail.record(format!("Recorded charge of {} for {}", record.amount, payment_id));
        tracing::info!(payment_id, amount = record.amount, "Recorded charge row");

        // 5. Next charge
        self.gateway
            .schedule_payment(&schedule_id, &payment, period.next_schedule_at)
            .await
            .map_err(|e| WebhookFailure::new(WebhookStep::RegisterSchedule, e))?;
        trail.record(format!(
            "Scheduled next payment {} at {}",
            schedule_id, period.next_schedule_at
        ));
        tracing::info!(
            payment_id,
            schedule_id = %schedule_id,
            amount = payment.amount,
            time_to_pay = %period.next_schedule_at,
            "Registered next payment"
        );

        Ok(WebhookOutcome::processed(
            format!("Subscription payment {} recorded and next payment scheduled", payment_id),
            trail,
        ))
    }

    async fn process_cancelled(&self, payment_id: &str) -> Result<WebhookOutcome, WebhookFailure> {
        let mut trail = AuditTrail::new();

        // 1. Original charge
        let original = self
            .ledger
            .get_by_transaction_key(payment_id)
            .await
            .map_err(|e| WebhookFailure::new(WebhookStep::LookupCharge, e))?;
        if !original.is_charge() {
            return Err(WebhookFailure::new(
                WebhookStep::LookupCharge,
                BillingError::not_found(format!(
                    "no active charge for payment '{}'; it is already cancelled",
                    payment_id
                )),
            ));
        }
        trail.record(format!(
            "Found charge of {} for {} (next schedule {})",
            original.amount, payment_id, original.next_schedule_id
        ));

        // 2. Reversal row
        let reversal = self
            .ledger
            .insert_cancellation(&original)
            .await
            .map_err(|e| WebhookFailure::new(WebhookStep::InsertReversal, e))?;
        trail.record(format!("Recorded reversal of {} for {}", reversal.amount, payment_id));
        tracing::info!(payment_id, amount = reversal.amount, "Recorded reversal row");

        // 3. Billing key
        let payment = self
            .gateway
            .fetch_payment(payment_id)
            .await
            .map_err(|e| WebhookFailure::new(WebhookStep::RefetchPayment, e))?;
        let billing_key = payment.billing_key.ok_or_else(|| {
            WebhookFailure::new(
                WebhookStep::RefetchPayment,
                BillingError::not_found(format!("payment '{}' has no billing key", payment_id)),
            )
        })?;
        trail.record(format!("Fetched billing key for {}", payment_id));

        // 4. Pending schedules around the recorded next charge
        let schedules = self
            .gateway
            .list_scheduled_payments(&billing_key, original.next_schedule_at)
            .await
            .map_err(|e| WebhookFailure::new(WebhookStep::ListSchedules, e))?;
        trail.record(format!(
            "Listed {} pending schedule(s) around {}",
            schedules.len(),
            original.next_schedule_at
        ));

        // 5. The one registered for this charge
        let scheduled = schedules
            .into_iter()
            .find(|s| s.payment_id == original.next_schedule_id.as_str())
            .ok_or_else(|| {
                WebhookFailure::new(
                    WebhookStep::MatchSchedule,
                    BillingError::not_found(format!(
                        "no pending schedule for next payment '{}'",
                        original.next_schedule_id
                    )),
                )
            })?;
        trail.record(format!(
            "Matched schedule {} for next payment {}",
            scheduled.schedule_id, original.next_schedule_id
        ));

        // 6. Cancel it
        self.gateway
            .cancel_scheduled_payment(&scheduled.schedule_id)
            .await
            .map_err(|e| WebhookFailure::new(WebhookStep::CancelSchedule, e))?;
        trail.record(format!("Cancelled schedule {}", scheduled.schedule_id));
        tracing::info!(
            payment_id,
            schedule_id = %scheduled.schedule_id,
            "Cancelled next payment"
        );

        Ok(WebhookOutcome::processed(
            format!("Subscription payment {} cancelled and next payment unscheduled", payment_id),
            trail,
        ))
    }
}
