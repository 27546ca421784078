//! ListMagazinesHandler - Query handler for the article listing.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::magazine::{Magazine, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::ports::MagazineRepository;

#[derive(Debug, Clone, Default)]
pub struct ListMagazinesQuery {
    /// Defaults to 10, capped at 50. Zero counts as unset.
    pub limit: Option<u32>,
}

pub struct ListMagazinesHandler {
    repository: Arc<dyn MagazineRepository>,
}

impl ListMagazinesHandler {
    pub fn new(repository: Arc<dyn MagazineRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListMagazinesQuery) -> Result<Vec<Magazine>, DomainError> {
        let limit = query
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .min(MAX_LIST_LIMIT);
        self.repository.list(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMagazineRepository;
    use crate::domain::magazine::NewMagazine;

    async fn seeded(count: usize) -> Arc<InMemoryMagazineRepository> {
        let repo = Arc::new(InMemoryMagazineRepository::new());
        for i in 0..count {
            let article =
                NewMagazine::new(None, "news", format!("title {}", i), "d", "c", None).unwrap();
            repo.create(article).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn default_limit_is_ten() {
        let handler = ListMagazinesHandler::new(seeded(12).await);
        let listed = handler.handle(ListMagazinesQuery::default()).await.unwrap();
        assert_eq!(listed.len(), 10);
    }

    #[tokio::test]
    async fn limit_is_capped() {
        let handler = ListMagazinesHandler::new(seeded(55).await);
        let listed = handler
            .handle(ListMagazinesQuery { limit: Some(500) })
            .await
            .unwrap();
        assert_eq!(listed.len(), 50);
    }

    #[tokio::test]
    async fn zero_limit_uses_default() {
        let handler = ListMagazinesHandler::new(seeded(3).await);
        let listed = handler
            .handle(ListMagazinesQuery { limit: Some(0) })
            .await
            .unwrap();
        assert_eq!(listed.len(), 3);
    }
}
