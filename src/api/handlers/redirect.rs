//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its original URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// Uses 307 Temporary Redirect so the mapping can be removed or changed
/// later without clients caching the target permanently.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier has no mapping.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let map = state.mappings.resolve(&short_id).await?;

    debug!("redirecting {} -> {}", short_id, map.original);

    Ok(Redirect::temporary(&map.original))
}
