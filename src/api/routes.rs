//! API route configuration.

use crate::api::handlers::{resolve_handler, shorten_handler, upload_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All `/api` routes.
///
/// # Endpoints
///
/// - `POST /id`              - Create a short link
/// - `GET  /id/{short_id}`   - Look up the original URL
/// - `POST /files`           - Re-host files and shorten their download URLs
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/id", post(shorten_handler))
        .route("/id/{short_id}", get(resolve_handler))
        .route("/files", post(upload_handler))
}
