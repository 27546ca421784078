//! PostgreSQL implementation of MagazineRepository.

use crate::domain::foundation::{DomainError, MagazineId, Timestamp};
use crate::domain::magazine::{Magazine, NewMagazine};
use crate::ports::MagazineRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the MagazineRepository port.
pub struct PostgresMagazineRepository {
    pool: PgPool,
}

impl PostgresMagazineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MagazineRow {
    id: Uuid,
    image_url: Option<String>,
    category: String,
    title: String,
    description: String,
    content: String,
    tags: Option<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl From<MagazineRow> for Magazine {
    fn from(row: MagazineRow) -> Self {
        Magazine {
            id: MagazineId::from_uuid(row.id),
            image_url: row.image_url,
            category: row.category,
            title: row.title,
            description: row.description,
            content: row.content,
            tags: row.tags,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl MagazineRepository for PostgresMagazineRepository {
    async fn list(&self, limit: u32) -> Result<Vec<Magazine>, DomainError> {
        let rows: Vec<MagazineRow> = sqlx::query_as(
            r#"
            SELECT id, image_url, category, title, description, content, tags, created_at
            FROM magazine
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list magazines: {}", e)))?;

        Ok(rows.into_iter().map(Magazine::from).collect())
    }

    async fn find_by_id(&self, id: &MagazineId) -> Result<Option<Magazine>, DomainError> {
        let row: Option<MagazineRow> = sqlx::query_as(
            r#"
            SELECT id, image_url, category, title, description, content, tags, created_at
            FROM magazine
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find magazine: {}", e)))?;

        Ok(row.map(Magazine::from))
    }

    async fn create(&self, magazine: NewMagazine) -> Result<MagazineId, DomainError> {
        let id = MagazineId::new();

        sqlx::query(
            r#"
            INSERT INTO magazine (id, image_url, category, title, description, content, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&magazine.image_url)
        .bind(&magazine.category)
        .bind(&magazine.title)
        .bind(&magazine.description)
        .bind(&magazine.content)
        .bind(&magazine.tags)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save magazine: {}", e)))?;

        Ok(id)
    }
}
