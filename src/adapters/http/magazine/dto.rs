//! HTTP DTOs for the magazine catalog.

use serde::{Deserialize, Serialize};

use crate::application::handlers::magazine::SubmitMagazineCommand;
use crate::domain::magazine::Magazine;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMagazinesParams {
    pub limit: Option<u32>,
}

/// Article submission. Missing text fields decode as empty and are
/// rejected by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitMagazineRequest {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<SubmitMagazineRequest> for SubmitMagazineCommand {
    fn from(req: SubmitMagazineRequest) -> Self {
        SubmitMagazineCommand {
            image_url: req.image_url,
            category: req.category,
            title: req.title,
            description: req.description,
            content: req.content,
            tags: req.tags,
        }
    }
}

/// Card shown in the listing; omits the article body.
#[derive(Debug, Clone, Serialize)]
pub struct MagazineSummaryResponse {
    pub id: String,
    pub image_url: Option<String>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub tags: Option<Vec<String>>,
}

impl From<Magazine> for MagazineSummaryResponse {
    fn from(m: Magazine) -> Self {
        Self {
            id: m.id.to_string(),
            image_url: m.image_url,
            category: m.category,
            title: m.title,
            description: m.description,
            tags: m.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MagazineListResponse {
    pub success: bool,
    pub magazines: Vec<MagazineSummaryResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MagazineResponse {
    pub id: String,
    pub image_url: Option<String>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Option<Vec<String>>,
    /// ISO 8601
    pub created_at: String,
}

impl From<Magazine> for MagazineResponse {
    fn from(m: Magazine) -> Self {
        Self {
            id: m.id.to_string(),
            image_url: m.image_url,
            category: m.category,
            title: m.title,
            description: m.description,
            content: m.content,
            tags: m.tags,
            created_at: m.created_at.to_iso_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MagazineDetailResponse {
    pub success: bool,
    pub magazine: MagazineResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitMagazineResponse {
    pub success: bool,
    pub id: String,
}
