//! Payment ledger rows.
//!
//! The ledger is append-only: a cancellation is a new row that mirrors the
//! charge with a negated amount, never an update of the charge row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::BillingPeriod;
use crate::domain::foundation::{ScheduleId, Timestamp, ValidationError};

/// Kind of ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerStatus {
    /// A successful charge.
    Paid,
    /// Reversal of a prior charge.
    Cancel,
}

impl LedgerStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerStatus::Paid => "Paid",
            LedgerStatus::Cancel => "Cancel",
        }
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LedgerStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paid" => Ok(LedgerStatus::Paid),
            "Cancel" => Ok(LedgerStatus::Cancel),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown ledger status '{}'", other),
            )),
        }
    }
}

/// One row of the `payment` ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Gateway payment identifier.
    pub transaction_key: String,
    /// Positive for a charge, negative for its reversal.
    pub amount: i64,
    pub status: LedgerStatus,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub end_grace_at: Timestamp,
    pub next_schedule_at: Timestamp,
    pub next_schedule_id: ScheduleId,
}

impl PaymentRecord {
    /// Builds the charge row for a paid event.
    pub fn charge(
        transaction_key: impl Into<String>,
        amount: i64,
        period: &BillingPeriod,
        next_schedule_id: ScheduleId,
    ) -> Self {
        Self {
            transaction_key: transaction_key.into(),
            amount,
            status: LedgerStatus::Paid,
            start_at: period.start_at,
            end_at: period.end_at,
            end_grace_at: period.end_grace_at,
            next_schedule_at: period.next_schedule_at,
            next_schedule_id,
        }
    }

    /// Builds the reversal row for this charge.
    ///
    /// Period and schedule fields carry over unchanged.
    pub fn reversal(&self) -> Self {
        Self {
            amount: self.amount.saturating_neg(),
            status: LedgerStatus::Cancel,
            ..self.clone()
        }
    }

    /// Whether this row is a charge.
    pub fn is_charge(&self) -> bool {
        self.status == LedgerStatus::Paid
    }

    /// The billing period recorded on this row.
    pub fn period(&self) -> BillingPeriod {
        BillingPeriod {
            start_at: self.start_at,
            end_at: self.end_at,
            end_grace_at: self.end_grace_at,
            next_schedule_at: self.next_schedule_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_charge() -> PaymentRecord {
        let period = BillingPeriod::with_minute(Timestamp::now(), 12).unwrap();
        PaymentRecord::charge("pay_123", 9900, &period, ScheduleId::generate())
    }

    #[test]
    fn charge_row_is_paid_and_positive() {
        let row = sample_charge();
        assert_eq!(row.status, LedgerStatus::Paid);
        assert_eq!(row.amount, 9900);
        assert!(row.is_charge());
    }

    #[test]
    fn reversal_negates_amount_and_keeps_period() {
        let charge = sample_charge();
        let reversal = charge.reversal();

        assert_eq!(reversal.amount, -9900);
        assert_eq!(reversal.status, LedgerStatus::Cancel);
        assert_eq!(reversal.transaction_key, charge.transaction_key);
        assert_eq!(reversal.period(), charge.period());
        assert_eq!(reversal.next_schedule_id, charge.next_schedule_id);
        assert!(!reversal.is_charge());
    }

    #[test]
    fn ledger_status_parses_storage_strings() {
        assert_eq!("Paid".parse::<LedgerStatus>().unwrap(), LedgerStatus::Paid);
        assert_eq!("Cancel".parse::<LedgerStatus>().unwrap(), LedgerStatus::Cancel);
        assert!("Cancelled".parse::<LedgerStatus>().is_err());
    }

    #[test]
    fn ledger_status_serializes_as_storage_string() {
        assert_eq!(serde_json::to_string(&LedgerStatus::Cancel).unwrap(), "\"Cancel\"");
    }
}
