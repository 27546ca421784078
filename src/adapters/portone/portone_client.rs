//! PortOne V2 gateway adapter.
//!
//! Implements the `PaymentGateway` port over the PortOne REST API. Every
//! call goes through [`PortOneGateway::call`], which owns authentication,
//! status checking and body decoding.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PortOneConfig::new(api_secret).with_store_id("store-...");
//! let gateway = PortOneGateway::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Method, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::foundation::{ScheduleId, Timestamp};
use crate::ports::{
    BillingKeyCharge, GatewayError, PaymentGateway, PaymentInfo, ScheduledPayment,
};

use super::api_types::{
    BillingKeyPayment, CancelRequest, CustomerRef, DeleteSchedules, PortOneAmount, PortOnePayment,
    ScheduleFilter, ScheduleList, ScheduleQuery, ScheduleRequest,
};

/// Default PortOne API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.portone.io";

/// Reason sent when a direct cancellation does not give one.
pub const DEFAULT_CANCEL_REASON: &str = "no reason provided";

/// Half-width of the schedule lookup window, in days.
const SCHEDULE_WINDOW_DAYS: u64 = 1;

/// PortOne API configuration.
#[derive(Clone)]
pub struct PortOneConfig {
    /// V2 API secret. `None` leaves the gateway unconfigured.
    api_secret: Option<SecretString>,

    /// Base URL for the API (default: https://api.portone.io).
    api_base_url: String,

    /// ISO 4217 currency for charges.
    currency: String,

    /// Store id, forwarded on schedule lookups when set.
    store_id: Option<String>,
}

impl PortOneConfig {
    /// Create a configuration with an API secret.
    pub fn new(api_secret: impl Into<String>) -> Self {
        Self::unconfigured().with_secret(Some(api_secret.into()))
    }

    /// Create a configuration without a secret.
    ///
    /// Every gateway call fails with `NotConfigured` until a secret is set.
    pub fn unconfigured() -> Self {
        Self {
            api_secret: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            currency: "KRW".to_string(),
            store_id: None,
        }
    }

    /// Replace the secret. Blank secrets count as absent.
    pub fn with_secret(mut self, secret: Option<String>) -> Self {
        self.api_secret = secret
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::new);
        self
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_store_id(mut self, store_id: Option<String>) -> Self {
        self.store_id = store_id.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_secret.is_some()
    }
}

impl std::fmt::Debug for PortOneConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortOneConfig")
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("currency", &self.currency)
            .field("store_id", &self.store_id)
            .finish()
    }
}

/// PortOne payment gateway adapter.
pub struct PortOneGateway {
    config: PortOneConfig,
    http_client: reqwest::Client,
}

impl PortOneGateway {
    pub fn new(config: PortOneConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(config: PortOneConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn secret(&self) -> Result<&SecretString, GatewayError> {
        self.config
            .api_secret
            .as_ref()
            .ok_or_else(|| GatewayError::not_configured("PortOne API secret is not configured"))
    }

    /// Base URL with percent-encoded path segments appended.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            GatewayError::not_configured(format!("invalid PortOne base URL: {}", e))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                GatewayError::not_configured("PortOne base URL cannot carry a path")
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Sends one authenticated request and decodes the JSON answer.
    ///
    /// An empty 2xx body decodes as `null`.
    async fn call<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        context: &str,
    ) -> Result<serde_json::Value, GatewayError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let secret = self.secret()?;

        let mut request = self.http_client.request(method, url).header(
            reqwest::header::AUTHORIZATION,
            format!("PortOne {}", secret.expose_secret()),
        );
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, context, "PortOne request failed");
            GatewayError::network(format!("{}: {}", context, e))
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::network(format!("{}: {}", context, e)))?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %text,
                context,
                "PortOne returned an error"
            );
            return Err(GatewayError::upstream(status.as_u16(), text, context));
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            GatewayError::invalid_response(format!("{}: unreadable response: {}", context, e))
        })
    }

    fn decode<T: DeserializeOwned>(
        value: serde_json::Value,
        context: &str,
    ) -> Result<T, GatewayError> {
        serde_json::from_value(value).map_err(|e| {
            GatewayError::invalid_response(format!(
                "{}: unexpected response shape: {}",
                context, e
            ))
        })
    }
}

#[async_trait]
impl PaymentGateway for PortOneGateway {
    fn ensure_configured(&self) -> Result<(), GatewayError> {
        self.secret().map(|_| ())
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<PaymentInfo, GatewayError> {
        let context = "fetch payment";
        let url = self.endpoint(&["payments", payment_id])?;
        let value = self.call::<()>(Method::GET, url, None, context).await?;
        let payment: PortOnePayment = Self::decode(value, context)?;
        PaymentInfo::try_from(payment)
    }

    async fn schedule_payment(
        &self,
        schedule_id: &ScheduleId,
        payment: &PaymentInfo,
        time_to_pay: Timestamp,
    ) -> Result<(), GatewayError> {
        let context = "schedule payment";
        let billing_key = payment.billing_key.as_deref().ok_or_else(|| {
            GatewayError::invalid_response(format!(
                "payment '{}' has no billing key to schedule",
                payment.id
            ))
        })?;

        let body = ScheduleRequest {
            payment: BillingKeyPayment {
                billing_key,
                order_name: &payment.order_name,
                customer: CustomerRef {
                    id: &payment.customer_id,
                },
                amount: PortOneAmount {
                    total: payment.amount,
                },
                currency: &self.config.currency,
            },
            time_to_pay: time_to_pay.to_iso_string(),
        };

        let url = self.endpoint(&["payments", schedule_id.as_str(), "schedule"])?;
        self.call(Method::POST, url, Some(&body), context).await?;
        Ok(())
    }

    async fn list_scheduled_payments(
        &self,
        billing_key: &str,
        around: Timestamp,
    ) -> Result<Vec<ScheduledPayment>, GatewayError> {
        let context = "list scheduled payments";
        let query = ScheduleQuery {
            filter: ScheduleFilter {
                billing_key,
                from: around.minus_days(SCHEDULE_WINDOW_DAYS).to_iso_string(),
                until: around.add_days(SCHEDULE_WINDOW_DAYS).to_iso_string(),
                store_id: self.config.store_id.as_deref(),
            },
        };
        let encoded = serde_json::to_string(&query)
            .map_err(|e| GatewayError::invalid_response(format!("{}: {}", context, e)))?;

        let mut url = self.endpoint(&["payment-schedules"])?;
        url.query_pairs_mut().append_pair("requestBody", &encoded);

        let value = self.call::<()>(Method::GET, url, None, context).await?;
        let list: ScheduleList = Self::decode(value, context)?;
        Ok(list.items.into_iter().map(ScheduledPayment::from).collect())
    }

    async fn cancel_scheduled_payment(&self, schedule_id: &str) -> Result<(), GatewayError> {
        let body = DeleteSchedules {
            schedule_ids: vec![schedule_id],
        };
        let url = self.endpoint(&["payment-schedules"])?;
        self.call(Method::DELETE, url, Some(&body), "cancel scheduled payment")
            .await?;
        Ok(())
    }

    async fn charge_billing_key(
        &self,
        payment_id: &str,
        charge: &BillingKeyCharge,
    ) -> Result<serde_json::Value, GatewayError> {
        let body = BillingKeyPayment {
            billing_key: &charge.billing_key,
            order_name: &charge.order_name,
            customer: CustomerRef {
                id: &charge.customer_id,
            },
            amount: PortOneAmount {
                total: charge.amount,
            },
            currency: &self.config.currency,
        };
        let url = self.endpoint(&["payments", payment_id, "billing-key"])?;
        self.call(Method::POST, url, Some(&body), "charge billing key")
            .await
    }

    async fn cancel_payment(
        &self,
        payment_id: &str,
        reason: Option<&str>,
    ) -> Result<serde_json::Value, GatewayError> {
        let body = CancelRequest {
            reason: reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or(DEFAULT_CANCEL_REASON),
        };
        let url = self.endpoint(&["payments", payment_id, "cancel"])?;
        self.call(Method::POST, url, Some(&body), "cancel payment")
            .await
    }
}
