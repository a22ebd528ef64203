//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/id`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "custom_id": "my-link"  // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the original URL and the full short link:
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "short_link": "http://localhost:3000/abc123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - missing or malformed URL, invalid custom identifier
/// - `409 Conflict` - custom identifier already taken or reserved, or the
///   URL was already shortened (the existing short link is in the error details)
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let map = state
        .mappings
        .create_mapping(payload.url, payload.custom_id)
        .await?;

    let short_link = state.mappings.short_link(&map.short);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            url: map.original,
            short_link,
        }),
    ))
}
