//! Ledger store port for the `payment` table.
//!
//! The ledger is append-only. Implementations expose two primitives
//! (`append` and `find_latest`); the charge/cancellation helpers are
//! provided on top of them so every backend enforces the same rules.
//!
//! # Example
//!
//! ```ignore
//! async fn reverse(store: &dyn LedgerStore, key: &str) -> Result<PaymentRecord, DomainError> {
//!     let original = store.get_by_transaction_key(key).await?;
//!     store.insert_cancellation(&original).await
//! }
//! ```

use crate::domain::billing::PaymentRecord;
use crate::domain::foundation::{DomainError, ErrorCode};
use async_trait::async_trait;

/// Repository port for payment ledger rows.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Append a row.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the write is rejected
    async fn append(&self, record: &PaymentRecord) -> Result<(), DomainError>;

    /// Most recently appended row for a transaction key.
    ///
    /// Returns `None` if the key has no rows.
    async fn find_latest(&self, transaction_key: &str)
        -> Result<Option<PaymentRecord>, DomainError>;

    /// Most recently appended row for a transaction key.
    ///
    /// # Errors
    ///
    /// - `PaymentRecordNotFound` if the key has no rows
    /// - `DatabaseError` on read failure
    async fn get_by_transaction_key(
        &self,
        transaction_key: &str,
    ) -> Result<PaymentRecord, DomainError> {
        self.find_latest(transaction_key).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::PaymentRecordNotFound,
                format!("no payment record for transaction key '{}'", transaction_key),
            )
            .with_detail("transaction_key", transaction_key)
        })
    }

    /// Append a charge row.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the row is not a `Paid` row
    /// - `DatabaseError` if the write is rejected
    async fn insert_charge(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        if !record.is_charge() {
            return Err(DomainError::validation(
                "status",
                format!("charge rows must be Paid, got {}", record.status),
            ));
        }
        self.append(record).await
    }

    /// Append the reversal of `original` and return it.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `original` is itself a reversal
    /// - `DatabaseError` if the write is rejected
    async fn insert_cancellation(
        &self,
        original: &PaymentRecord,
    ) -> Result<PaymentRecord, DomainError> {
        if !original.is_charge() {
            return Err(DomainError::validation(
                "status",
                "only a Paid row can be reversed",
            ));
        }
        let reversal = original.reversal();
        self.append(&reversal).await?;
        Ok(reversal)
    }
}
