//! PostgreSQL implementation of LedgerStore.
//!
//! Rows live in the `payment` table. Insertion order is tracked by
//! `created_at` with the serial `id` breaking ties.

use crate::domain::billing::{LedgerStatus, PaymentRecord};
use crate::domain::foundation::{DomainError, ErrorCode, ScheduleId, Timestamp};
use crate::ports::LedgerStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of the LedgerStore port.
pub struct PostgresLedgerStore {
    pool: PgPool,
}

impl PostgresLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a ledger entry.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    transaction_key: String,
    amount: i64,
    status: String,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    end_grace_at: DateTime<Utc>,
    next_schedule_at: DateTime<Utc>,
    next_schedule_id: String,
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status: LedgerStatus = row.status.parse().map_err(|e| {
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
            start_at: Timestamp::from_datetime(row.start_at),
            end_at: Timestamp::from_datetime(row.end_at),
            end_grace_at: Timestamp::from_datetime(row.end_grace_at),
            next_schedule_at: Timestamp::from_datetime(row.next_schedule_at),
            next_schedule_id,
        })
    }
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn append(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payment (
                transaction_key, amount, status, start_at, end_at,
                end_grace_at, next_schedule_at, next_schedule_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&record.transaction_key)
        .bind(record.amount)
        .bind(record.status.as_str())
        .bind(record.start_at.as_datetime())
        .bind(record.end_at.as_datetime())
        .bind(record.end_grace_at.as_datetime())
        .bind(record.next_schedule_at.as_datetime())
        .bind(record.next_schedule_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to insert payment record: {}", e))
                .with_detail("transaction_key", record.transaction_key.as_str())
        })?;

        Ok(())
    }

    async fn find_latest(
        &self,
        transaction_key: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT transaction_key, amount, status, start_at, end_at,
                   end_grace_at, next_schedule_at, next_schedule_id
            FROM payment
            WHERE transaction_key = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(transaction_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find payment record: {}", e)))?;

        row.map(PaymentRecord::try_from).transpose()
    }
}
