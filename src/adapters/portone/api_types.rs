//! PortOne V2 request and response bodies.

use serde::{Deserialize, Serialize};

use crate::ports::{GatewayError, PaymentInfo, ScheduledPayment};

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// `GET /payments/{paymentId}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortOnePayment {
    pub id: String,
    #[serde(default)]
    pub billing_key: Option<String>,
    #[serde(default)]
    pub order_name: String,
    pub amount: PortOneAmount,
    #[serde(default)]
    pub customer: Option<PortOneCustomer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortOneAmount {
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortOneCustomer {
    #[serde(default)]
    pub id: Option<String>,
}

impl TryFrom<PortOnePayment> for PaymentInfo {
    type Error = GatewayError;

    fn try_from(payment: PortOnePayment) -> Result<Self, Self::Error> {
        let customer_id = payment
            .customer
            .and_then(|c| c.id)
            .ok_or_else(|| {
                GatewayError::invalid_response(format!(
                    "payment '{}' has no customer id",
                    payment.id
                ))
            })?;

        Ok(PaymentInfo {
            id: payment.id,
            billing_key: payment.billing_key.filter(|k| !k.is_empty()),
            order_name: payment.order_name,
            amount: payment.amount.total,
            customer_id,
        })
    }
}

/// `GET /payment-schedules`
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleList {
    #[serde(default)]
    pub items: Vec<ScheduleItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    pub payment_id: String,
}

impl From<ScheduleItem> for ScheduledPayment {
    fn from(item: ScheduleItem) -> Self {
        ScheduledPayment {
            schedule_id: item.id,
            payment_id: item.payment_id,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct CustomerRef<'a> {
    pub id: &'a str,
}

/// `POST /payments/{scheduleId}/schedule`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest<'a> {
    pub payment: BillingKeyPayment<'a>,
    pub time_to_pay: String,
}

/// Payment body shared by scheduled and immediate billing-key charges.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingKeyPayment<'a> {
    pub billing_key: &'a str,
    pub order_name: &'a str,
    pub customer: CustomerRef<'a>,
    pub amount: PortOneAmount,
    pub currency: &'a str,
}

/// Query body for `GET /payment-schedules`, sent as the `requestBody` parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleQuery<'a> {
    pub filter: ScheduleFilter<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFilter<'a> {
    pub billing_key: &'a str,
    pub from: String,
    pub until: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<&'a str>,
}

/// `DELETE /payment-schedules`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSchedules<'a> {
    pub schedule_ids: Vec<&'a str>,
}

/// `POST /payments/{paymentId}/cancel`
#[derive(Debug, Clone, Serialize)]
pub struct CancelRequest<'a> {
    pub reason: &'a str,
}
