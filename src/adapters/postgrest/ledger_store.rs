//! PostgREST implementation of LedgerStore.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::PostgrestClient;
use crate::domain::billing::PaymentRecord;
use crate::domain::foundation::{DomainError, ErrorCode, ScheduleId, Timestamp};
use crate::ports::LedgerStore;

const TABLE: &str = "payment";

/// Ledger store over the `payment` table exposed by PostgREST.
pub struct PostgrestLedgerStore {
    client: PostgrestClient,
}

impl PostgrestLedgerStore {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

/// Wire shape of a `payment` row.
#[derive(Debug, Serialize, Deserialize)]
struct PaymentRow {
    transaction_key: String,
    amount: i64,
    status: String,
    start_at: Timestamp,
    end_at: Timestamp,
    end_grace_at: Timestamp,
    next_schedule_at: Timestamp,
    next_schedule_id: String,
}

impl From<&PaymentRecord> for PaymentRow {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            transaction_key: record.transaction_key.clone(),
            amount: record.amount,
            status: record.status.as_str().to_string(),
            start_at: record.start_at,
            end_at: record.end_at,
            end_grace_at: record.end_grace_at,
            next_schedule_at: record.next_schedule_at,
            next_schedule_id: record.next_schedule_id.to_string(),
        }
    }
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid status value: {}", e))
        })?;
        let next_schedule_id = ScheduleId::new(row.next_schedule_id).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid next_schedule_id: {}", e),
            )
        })?;

        Ok(PaymentRecord {
            transaction_key: row.transaction_key,
            amount: row.amount,
            status,
            start_at: row.start_at,
            end_at: row.end_at,
            end_grace_at: row.end_grace_at,
            next_schedule_at: row.next_schedule_at,
            next_schedule_id,
        })
    }
}

/// Newest row first; `id` breaks ties between rows sharing a `created_at`.
fn latest_row_params(transaction_key: &str) -> [(&'static str, String); 3] {
    [
        ("transaction_key", format!("eq.{}", transaction_key)),
        ("order", "created_at.desc,id.desc".to_string()),
        ("limit", "1".to_string()),
    ]
}

#[async_trait]
impl LedgerStore for PostgrestLedgerStore {
    async fn append(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        self.client.insert(TABLE, &PaymentRow::from(record)).await
    }

    async fn find_latest(
        &self,
        transaction_key: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let rows: Vec<PaymentRow> = self
            .client
            .select(TABLE, &latest_row_params(transaction_key))
            .await?;

        rows.into_iter().next().map(PaymentRecord::try_from).transpose()
    }
}
