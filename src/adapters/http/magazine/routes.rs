//! Axum routes for the magazine catalog.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{get_magazine, list_magazines, submit_magazine};

/// - `GET /` - List articles
/// - `POST /` - Submit an article
/// - `GET /:id` - Fetch one article
pub fn magazine_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_magazines).post(submit_magazine))
        .route("/:id", get(get_magazine))
}
