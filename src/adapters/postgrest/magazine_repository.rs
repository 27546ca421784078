//! PostgREST implementation of MagazineRepository.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PostgrestClient;
use crate::domain::foundation::{DomainError, MagazineId, Timestamp};
use crate::domain::magazine::{Magazine, NewMagazine};
use crate::ports::MagazineRepository;

const TABLE: &str = "magazine";

pub struct PostgrestMagazineRepository {
    client: PostgrestClient,
}

impl PostgrestMagazineRepository {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct MagazineRow {
    id: Uuid,
    image_url: Option<String>,
    category: String,
    title: String,
    description: String,
    content: String,
    tags: Option<Vec<String>>,
    created_at: Timestamp,
}

#[derive(Debug, Serialize)]
struct InsertMagazine<'a> {
    id: Uuid,
    image_url: Option<&'a str>,
    category: &'a str,
    title: &'a str,
    description: &'a str,
    content: &'a str,
    tags: Option<&'a [String]>,
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
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MagazineRepository for PostgrestMagazineRepository {
    async fn list(&self, limit: u32) -> Result<Vec<Magazine>, DomainError> {
        let rows: Vec<MagazineRow> = self
            .client
            .select(
                TABLE,
                &[
                    ("order", "created_at.desc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Magazine::from).collect())
    }

    async fn find_by_id(&self, id: &MagazineId) -> Result<Option<Magazine>, DomainError> {
        let rows: Vec<MagazineRow> = self
            .client
            .select(
                TABLE,
                &[("id", format!("eq.{}", id)), ("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next().map(Magazine::from))
    }

    async fn create(&self, magazine: NewMagazine) -> Result<MagazineId, DomainError> {
        let id = MagazineId::new();
        let row = InsertMagazine {
            id: *id.as_uuid(),
            image_url: magazine.image_url.as_deref(),
            category: &magazine.category,
            title: &magazine.title,
            description: &magazine.description,
            content: &magazine.content,
            tags: magazine.tags.as_deref(),
        };
        self.client.insert(TABLE, &row).await?;
        Ok(id)
    }
}
