//! SubmitMagazineHandler - Command handler for new article submissions.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, MagazineId};
use crate::domain::magazine::NewMagazine;
use crate::ports::MagazineRepository;

#[derive(Debug, Clone, Default)]
pub struct SubmitMagazineCommand {
    pub image_url: Option<String>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
}

pub struct SubmitMagazineHandler {
    repository: Arc<dyn MagazineRepository>,
}

impl SubmitMagazineHandler {
    pub fn new(repository: Arc<dyn MagazineRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SubmitMagazineCommand) -> Result<MagazineId, DomainError> {
        let article = NewMagazine::new(
            cmd.image_url,
            cmd.category,
            cmd.title,
            cmd.description,
            cmd.content,
            cmd.tags,
        )?;

        let id = self.repository.create(article).await?;
        tracing::info!(magazine_id = %id, "Magazine submitted");
        Ok(id)
    }
}
