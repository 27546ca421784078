//! Inbound payment notifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Payment status carried by a gateway notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationStatus {
    Paid,
    Cancelled,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Paid => "Paid",
            NotificationStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paid" => Ok(NotificationStatus::Paid),
            "Cancelled" => Ok(NotificationStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unrecognized status '{}'", other),
            )),
        }
    }
}

/// A validated webhook notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentNotification {
    pub payment_id: String,
    pub status: NotificationStatus,
}

impl PaymentNotification {
    /// Validates raw webhook fields.
    ///
    /// Missing or blank fields are reported before the status is parsed.
    pub fn parse(payment_id: Option<&str>, status: Option<&str>) -> Result<Self, ValidationError> {
        let payment_id = payment_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::empty_field("payment_id"))?;
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::empty_field("status"))?;

        Ok(Self {
            payment_id: payment_id.to_string(),
            status: status.parse()?,
        })
    }
}
