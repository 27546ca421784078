//! Mock payment gateway for testing.
//!
//! Provides a configurable in-process implementation of `PaymentGateway`
//! for unit and integration tests. Supports:
//! - Pre-configured payments
//! - A working schedule book (registered schedules can be listed and cancelled)
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::foundation::{ScheduleId, Timestamp};
use crate::ports::{
    BillingKeyCharge, GatewayError, PaymentGateway, PaymentInfo, ScheduledPayment,
};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.add_payment(MockPaymentGateway::subscription_payment("pay_1", 9900, "c1"));
/// gateway.set_method_error("schedule_payment", GatewayError::network("boom"));
/// ```
#[derive(Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// When set, every call fails with `NotConfigured`.
    unconfigured: bool,

    /// Known payments by id.
    payments: HashMap<String, PaymentInfo>,

    /// Pending schedules.
    schedules: Vec<PendingSchedule>,

    /// Every accepted `schedule_payment` call, in order.
    registrations: Vec<ScheduleRegistration>,

    /// Response for `charge_billing_key`.
    charge_response: Option<serde_json::Value>,

    /// Error to return on next call.
    next_error: Option<GatewayError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, GatewayError>,

    call_log: Vec<MethodCall>,

    schedule_seq: u64,
}

#[derive(Debug, Clone)]
struct PendingSchedule {
    entry: ScheduledPayment,
    billing_key: String,
    time_to_pay: Timestamp,
}

/// A future charge accepted by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRegistration {
    pub schedule_id: ScheduleId,
    pub payment: PaymentInfo,
    pub time_to_pay: Timestamp,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway with no credential.
    pub fn unconfigured() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().unconfigured = true;
        mock
    }

    /// A subscription payment with billing key `bk_<id>`.
    pub fn subscription_payment(id: &str, amount: i64, customer_id: &str) -> PaymentInfo {
        PaymentInfo {
            id: id.to_string(),
            billing_key: Some(format!("bk_{}", id)),
            order_name: "Monthly subscription".to_string(),
            amount,
            customer_id: customer_id.to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub fn add_payment(&self, payment: PaymentInfo) {
        let id = payment.id.clone();
        self.inner.lock().unwrap().payments.insert(id, payment);
    }

    /// Seed a pending schedule that was registered outside this mock.
    pub fn add_schedule(
        &self,
        schedule_id: &str,
        payment_id: &str,
        billing_key: &str,
        time_to_pay: Timestamp,
    ) {
        self.inner.lock().unwrap().schedules.push(PendingSchedule {
            entry: ScheduledPayment {
                schedule_id: schedule_id.to_string(),
                payment_id: payment_id.to_string(),
            },
            billing_key: billing_key.to_string(),
            time_to_pay,
        });
    }

    pub fn set_charge_response(&self, response: serde_json::Value) {
        self.inner.lock().unwrap().charge_response = Some(response);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: GatewayError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: GatewayError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Inspection
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        self.inner.lock().unwrap().call_log.len()
    }

    pub fn registrations(&self) -> Vec<ScheduleRegistration> {
        self.inner.lock().unwrap().registrations.clone()
    }

    /// Schedules not yet cancelled.
    pub fn pending_schedules(&self) -> Vec<ScheduledPayment> {
        self.inner
            .lock()
            .unwrap()
            .schedules
            .iter()
            .map(|s| s.entry.clone())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), GatewayError> {
        let mut state = self.inner.lock().unwrap();

        if state.unconfigured {
            return Err(GatewayError::not_configured(
                "PortOne API secret is not configured",
            ));
        }

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentGateway {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    fn ensure_configured(&self) -> Result<(), GatewayError> {
        if self.inner.lock().unwrap().unconfigured {
            return Err(GatewayError::not_configured(
                "PortOne API secret is not configured",
            ));
        }
        Ok(())
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<PaymentInfo, GatewayError> {
        self.record_call("fetch_payment", vec![payment_id.to_string()]);
        self.check_error("fetch_payment")?;

        self.inner
            .lock()
            .unwrap()
            .payments
            .get(payment_id)
            .cloned()
            .ok_or_else(|| {
                GatewayError::upstream(
                    404,
                    json!({ "type": "PAYMENT_NOT_FOUND" }).to_string(),
                    "fetch payment",
                )
            })
    }

    async fn schedule_payment(
        &self,
        schedule_id: &ScheduleId,
        payment: &PaymentInfo,
        time_to_pay: Timestamp,
    ) -> Result<(), GatewayError> {
        self.record_call(
            "schedule_payment",
            vec![
                schedule_id.to_string(),
                payment.id.clone(),
                payment.amount.to_string(),
                time_to_pay.to_iso_string(),
            ],
        );
        self.check_error("schedule_payment")?;

        let billing_key = payment.billing_key.clone().ok_or_else(|| {
            GatewayError::invalid_response(format!(
                "payment '{}' has no billing key to schedule",
                payment.id
            ))
        })?;

        let mut state = self.inner.lock().unwrap();
        state.schedule_seq += 1;
        let gateway_id = format!("schedule_{}", state.schedule_seq);
        state.schedules.push(PendingSchedule {
            entry: ScheduledPayment {
                schedule_id: gateway_id,
                payment_id: schedule_id.to_string(),
            },
            billing_key,
            time_to_pay,
        });
        state.registrations.push(ScheduleRegistration {
            schedule_id: schedule_id.clone(),
            payment: payment.clone(),
            time_to_pay,
        });
        Ok(())
    }

    async fn list_scheduled_payments(
        &self,
        billing_key: &str,
        around: Timestamp,
    ) -> Result<Vec<ScheduledPayment>, GatewayError> {
        self.record_call(
            "list_scheduled_payments",
            vec![billing_key.to_string(), around.to_iso_string()],
        );
        self.check_error("list_scheduled_payments")?;

        let from = around.minus_days(1);
        let until = around.add_days(1);
        Ok(self
            .inner
            .lock()
            .unwrap()
            .schedules
            .iter()
            .filter(|s| s.billing_key == billing_key)
            .filter(|s| !s.time_to_pay.is_before(&from) && !s.time_to_pay.is_after(&until))
            .map(|s| s.entry.clone())
            .collect())
    }

    async fn cancel_scheduled_payment(&self, schedule_id: &str) -> Result<(), GatewayError> {
        self.record_call("cancel_scheduled_payment", vec![schedule_id.to_string()]);
        self.check_error("cancel_scheduled_payment")?;

        let mut state = self.inner.lock().unwrap();
        let before = state.schedules.len();
        state.schedules.retain(|s| s.entry.schedule_id != schedule_id);
        if state.schedules.len() == before {
            return Err(GatewayError::upstream(
                404,
                json!({ "type": "PAYMENT_SCHEDULE_NOT_FOUND" }).to_string(),
                "cancel scheduled payment",
            ));
        }
        Ok(())
    }

    async fn charge_billing_key(
        &self,
        payment_id: &str,
        charge: &BillingKeyCharge,
    ) -> Result<serde_json::Value, GatewayError> {
        self.record_call(
            "charge_billing_key",
            vec![
                payment_id.to_string(),
                charge.billing_key.clone(),
                charge.amount.to_string(),
            ],
        );
        self.check_error("charge_billing_key")?;

        let configured = self.inner.lock().unwrap().charge_response.clone();
        Ok(configured.unwrap_or_else(|| {
            json!({
                "payment": {
                    "pgTxId": format!("pg_{}", payment_id),
                    "paidAt": Timestamp::now().to_iso_string(),
                }
            })
        }))
    }

    async fn cancel_payment(
        &self,
        payment_id: &str,
        reason: Option<&str>,
    ) -> Result<serde_json::Value, GatewayError> {
        let reason = reason.unwrap_or(super::DEFAULT_CANCEL_REASON);
        self.record_call(
            "cancel_payment",
            vec![payment_id.to_string(), reason.to_string()],
        );
        self.check_error("cancel_payment")?;

        Ok(json!({
            "cancellation": {
                "status": "SUCCEEDED",
                "reason": reason,
                "cancelledAt": Timestamp::now().to_iso_string(),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GatewayErrorCode;

    #[tokio::test]
    async fn fetch_returns_configured_payment() {
        let mock = MockPaymentGateway::new();
        mock.add_payment(MockPaymentGateway::subscription_payment("pay_1", 9900, "c1"));

        let info = mock.fetch_payment("pay_1").await.unwrap();
        assert_eq!(info.amount, 9900);
        assert_eq!(info.billing_key.as_deref(), Some("bk_pay_1"));
    }

    #[tokio::test]
    async fn fetch_unknown_payment_is_404() {
        let mock = MockPaymentGateway::new();
        let err = mock.fetch_payment("nope").await.unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::NotFound);
        assert_eq!(err.http_status, Some(404));
    }

    #[tokio::test]
    async fn registered_schedule_can_be_listed_and_cancelled() {
        let mock = MockPaymentGateway::new();
        let payment = MockPaymentGateway::subscription_payment("pay_1", 9900, "c1");
        let schedule_id = ScheduleId::generate();
        let when = Timestamp::now().add_days(31);

        mock.schedule_payment(&schedule_id, &payment, when).await.unwrap();

        let listed = mock.list_scheduled_payments("bk_pay_1", when).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].payment_id, schedule_id.as_str());

        mock.cancel_scheduled_payment(&listed[0].schedule_id).await.unwrap();
        assert!(mock.pending_schedules().is_empty());
    }

    #[tokio::test]
    async fn listing_respects_window_and_billing_key() {
        let mock = MockPaymentGateway::new();
        let when = Timestamp::now();
        mock.add_schedule("s1", "p1", "bk_a", when.add_days(3));
        mock.add_schedule("s2", "p2", "bk_b", when);

        assert!(mock.list_scheduled_payments("bk_a", when).await.unwrap().is_empty());
        assert_eq!(mock.list_scheduled_payments("bk_b", when).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unconfigured_mock_rejects_everything() {
        let mock = MockPaymentGateway::unconfigured();
        assert!(mock.ensure_configured().is_err());
        let err = mock.fetch_payment("pay_1").await.unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::NotConfigured);
    }

    #[tokio::test]
    async fn method_error_only_affects_method() {
        let mock = MockPaymentGateway::new();
        mock.add_payment(MockPaymentGateway::subscription_payment("pay_1", 100, "c1"));
        mock.set_method_error("cancel_payment", GatewayError::network("down"));

        assert!(mock.fetch_payment("pay_1").await.is_ok());
        assert!(mock.cancel_payment("pay_1", None).await.is_err());
    }

    #[tokio::test]
    async fn cancel_payment_defaults_reason() {
        let mock = MockPaymentGateway::new();
        let body = mock.cancel_payment("pay_1", None).await.unwrap();
        assert_eq!(body["cancellation"]["reason"], "no reason provided");
        assert_eq!(mock.calls()[0].args[1], "no reason provided");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mock = MockPaymentGateway::new();
        let clone = mock.clone();
        let _ = clone.fetch_payment("x").await;
        assert!(mock.was_called("fetch_payment"));
        assert_eq!(mock.total_calls(), 1);
    }
}
