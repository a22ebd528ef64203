//! Handler for short identifier lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::shorten::ResolveResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the original URL behind a short identifier.
///
/// # Endpoint
///
/// `GET /api/id/{short_id}`
///
/// # Errors
///
/// Returns 404 Not Found if the identifier has no mapping.
pub async fn resolve_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let map = state.mappings.resolve(&short_id).await?;

    Ok(Json(ResolveResponse { url: map.original }))
}
