//! Magazine repository port.

use crate::domain::foundation::{DomainError, MagazineId};
use crate::domain::magazine::{Magazine, NewMagazine};
use async_trait::async_trait;

/// Repository port for magazine articles.
#[async_trait]
pub trait MagazineRepository: Send + Sync {
    /// Newest articles first, at most `limit`.
    async fn list(&self, limit: u32) -> Result<Vec<Magazine>, DomainError>;

    /// Returns `None` if no article has this id.
    async fn find_by_id(&self, id: &MagazineId) -> Result<Option<Magazine>, DomainError>;

    /// Persist a submission and return its id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the write is rejected
    async fn create(&self, magazine: NewMagazine) -> Result<MagazineId, DomainError>;
}
