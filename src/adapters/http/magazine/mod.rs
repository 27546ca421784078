//! HTTP adapter for the magazine catalog.
//!
//! - `GET /api/magazines?limit=` - Newest articles first
//! - `GET /api/magazines/:id` - One article
//! - `POST /api/magazines` - Submit an article

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{get_magazine, list_magazines, submit_magazine, MagazineApiError};
pub use routes::magazine_routes;
