//! In-memory magazine repository.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, MagazineId, Timestamp};
use crate::domain::magazine::{Magazine, NewMagazine};
use crate::ports::MagazineRepository;

/// In-memory article catalog.
#[derive(Default)]
pub struct InMemoryMagazineRepository {
    articles: RwLock<Vec<Magazine>>,
}

impl InMemoryMagazineRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.articles.read().expect("catalog lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MagazineRepository for InMemoryMagazineRepository {
    async fn list(&self, limit: u32) -> Result<Vec<Magazine>, DomainError> {
        let articles = self.articles.read().expect("catalog lock poisoned");
        Ok(articles
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &MagazineId) -> Result<Option<Magazine>, DomainError> {
        Ok(self
            .articles
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .find(|m| m.id == *id)
            .cloned())
    }

    async fn create(&self, magazine: NewMagazine) -> Result<MagazineId, DomainError> {
        let id = MagazineId::new();
        self.articles
            .write()
            .expect("catalog lock poisoned")
            .push(magazine.into_magazine(id, Timestamp::now()));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(title: &str) -> NewMagazine {
        NewMagazine::new(None, "culture", title, "desc", "body", None).unwrap()
    }

    #[tokio::test]
    async fn list_returns_newest_first_up_to_limit() {
        let repo = InMemoryMagazineRepository::new();
        for title in ["one", "two", "three"] {
            repo.create(submission(title)).await.unwrap();
        }

        let listed = repo.list(2).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "two"]);
    }

    #[tokio::test]
    async fn created_article_can_be_found() {
        let repo = InMemoryMagazineRepository::new();
        let id = repo.create(submission("found")).await.unwrap();
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().title, "found");
        assert!(repo.find_by_id(&MagazineId::new()).await.unwrap().is_none());
    }
}
