//! In-memory ledger store.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::domain::billing::PaymentRecord;
use crate::domain::foundation::DomainError;
use crate::ports::LedgerStore;

/// In-memory ledger for testing.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryLedgerStore::new());
/// store.insert_charge(&record).await?;
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryLedgerStore {
    rows: RwLock<Vec<PaymentRecord>>,
    reject_writes: AtomicBool,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the ledger.
    pub fn with_records(records: Vec<PaymentRecord>) -> Self {
        Self {
            rows: RwLock::new(records),
            reject_writes: AtomicBool::new(false),
        }
    }

    // === Test Helpers ===

    /// Makes every subsequent `append` fail with a database error.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// All rows in insertion order.
    pub fn records(&self) -> Vec<PaymentRecord> {
        self.rows.read().expect("ledger lock poisoned").clone()
    }

    pub fn records_for(&self, transaction_key: &str) -> Vec<PaymentRecord> {
        self.rows
            .read()
            .expect("ledger lock poisoned")
            .iter()
            .filter(|r| r.transaction_key == transaction_key)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.read().expect("ledger lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn append(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("ledger rejected the write"));
        }
        self.rows
            .write()
            .expect("ledger lock poisoned")
            .push(record.clone());
        Ok(())
    }

    async fn find_latest(
        &self,
        transaction_key: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(self
            .rows
            .read()
            .expect("ledger lock poisoned")
            .iter()
            .rev()
            .find(|r| r.transaction_key == transaction_key)
            .cloned())
    }
}
