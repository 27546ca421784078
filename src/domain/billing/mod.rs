//! Recurring billing domain.
//!
//! - `period` - billing period and next-charge date arithmetic
//! - `ledger` - append-only payment ledger rows
//! - `notification` - validated webhook input
//! - `audit` - audit trail and webhook outcome
//! - `errors` - billing error taxonomy and workflow steps

mod audit;
mod errors;
mod ledger;
mod notification;
mod period;

pub use audit::{AuditTrail, WebhookOutcome};
pub use errors::{BillingError, WebhookFailure, WebhookStep};
pub use ledger::{LedgerStatus, PaymentRecord};
pub use notification::{NotificationStatus, PaymentNotification};
pub use period::{
    civil_date, civil_zone, BillingPeriod, CIVIL_UTC_OFFSET_SECS, PERIOD_DAYS, SCHEDULE_HOUR,
};
