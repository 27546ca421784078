//! HTTP handlers for the magazine catalog.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::handlers::magazine::{GetMagazineQuery, ListMagazinesQuery};
use crate::domain::foundation::{DomainError, MagazineId};

use super::super::response::{ErrorResponse, MalformedRequest};
use super::super::state::AppState;
use super::dto::{
    ListMagazinesParams, MagazineDetailResponse, MagazineListResponse, MagazineResponse,
    MagazineSummaryResponse, SubmitMagazineRequest, SubmitMagazineResponse,
};

/// GET /api/magazines - List articles, newest first
pub async fn list_magazines(
    State(state): State<AppState>,
    params: Result<Query<ListMagazinesParams>, QueryRejection>,
) -> Result<Response, Response> {
    let Query(params) = params.map_err(|e| MalformedRequest::from(e).into_response())?;

    let magazines = state
        .list_magazines_handler()
        .handle(ListMagazinesQuery {
            limit: params.limit,
        })
        .await
        .map_err(|e| MagazineApiError(e).into_response())?;

    Ok(Json(MagazineListResponse {
        success: true,
        magazines: magazines
            .into_iter()
            .map(MagazineSummaryResponse::from)
            .collect(),
    })
    .into_response())
}

/// GET /api/magazines/:id - Fetch one article
pub async fn get_magazine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let id: MagazineId = id
        .parse()
        .map_err(|e| MagazineApiError(DomainError::from(e)).into_response())?;

    let magazine = state
        .get_magazine_handler()
        .handle(GetMagazineQuery { id })
        .await
        .map_err(|e| MagazineApiError(e).into_response())?;

    Ok(Json(MagazineDetailResponse {
        success: true,
        magazine: MagazineResponse::from(magazine),
    })
    .into_response())
}

/// POST /api/magazines - Submit a new article
pub async fn submit_magazine(
    State(state): State<AppState>,
    payload: Result<Json<SubmitMagazineRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(request) = payload.map_err(|e| MalformedRequest::from(e).into_response())?;

    let id = state
        .submit_magazine_handler()
        .handle(request.into())
        .await
        .map_err(|e| MagazineApiError(e).into_response())?;

    let body = SubmitMagazineResponse {
        success: true,
        id: id.to_string(),
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct MagazineApiError(pub DomainError);

impl IntoResponse for MagazineApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = if err.code.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.code.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(code = %err.code, error = %err.message, "Magazine request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let mut body = ErrorResponse::new(err.message.clone());
        if !err.details.is_empty() {
            body = body.with_details(json!(err.details));
        }
        body.into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, ValidationError};

    #[test]
    fn not_found_maps_to_404() {
        let err = DomainError::new(ErrorCode::MagazineNotFound, "missing");
        assert_eq!(
            MagazineApiError(err).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn validation_maps_to_400() {
        let err = DomainError::from(ValidationError::empty_field("title"));
        assert_eq!(
            MagazineApiError(err).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn database_error_maps_to_500() {
        let err = DomainError::database("connection reset");
        assert_eq!(
            MagazineApiError(err).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
