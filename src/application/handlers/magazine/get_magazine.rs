//! GetMagazineHandler - Query handler for a single article.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, MagazineId};
use crate::domain::magazine::Magazine;
use crate::ports::MagazineRepository;

#[derive(Debug, Clone)]
pub struct GetMagazineQuery {
    pub id: MagazineId,
}

pub struct GetMagazineHandler {
    repository: Arc<dyn MagazineRepository>,
}

impl GetMagazineHandler {
    pub fn new(repository: Arc<dyn MagazineRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetMagazineQuery) -> Result<Magazine, DomainError> {
        self.repository
            .find_by_id(&query.id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MagazineNotFound,
                    format!("Magazine {} not found", query.id),
                )
            })
    }
}
