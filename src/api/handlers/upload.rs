//! Handler for the file upload endpoint.

use axum::{Json, extract::Multipart, extract::State};
use serde_json::json;

use crate::api::dto::upload::{BatchSummary, UploadResponse, UploadResultItem};
use crate::application::services::UploadedFile;
use crate::error::AppError;
use crate::state::AppState;

/// Re-hosts uploaded files on remote storage and shortens their download URLs.
///
/// # Endpoint
///
/// `POST /api/files` (multipart form data, one part per file)
///
/// # Batch Processing
///
/// Files are processed independently. If one fails, others continue
/// processing. Each result includes either success data or error
/// information.
///
/// # Response
///
/// ```json
/// {
///   "summary": {
///     "total": 2,
///     "successful": 1,
///     "failed": 1
///   },
///   "items": [
///     {
///       "filename": "photo.jpg",
///       "url": "https://downloader.disk.yandex.ru/...",
///       "short_link": "http://localhost:3000/abc123"
///     },
///     {
///       "filename": "broken.bin",
///       "error": { "code": "upload_failed", "message": "...", "details": {} }
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - the multipart body contains no files
/// - `500 Internal Server Error` - no storage credential is configured
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let Some(uploads) = &state.uploads else {
        return Err(AppError::internal(
            "File uploads are not configured on this server",
            json!({}),
        ));
    };

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {e}"), json!({})))?
    {
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read file: {e}"), json!({})))?;

        files.push(UploadedFile {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(AppError::bad_request(
            "No files in upload request",
            json!({}),
        ));
    }

    let total = files.len();
    let results = uploads.upload_and_shorten(files).await;

    let mut successful = 0;
    let mut failed = 0;
    let items = results
        .into_iter()
        .map(|item| match item.result {
            Ok(link) => {
                successful += 1;
                UploadResultItem::Success {
                    filename: item.filename,
                    url: link.original,
                    short_link: link.short_link,
                }
            }
            Err(err) => {
                failed += 1;
                UploadResultItem::Error {
                    filename: item.filename,
                    error: err.to_error_info(),
                }
            }
        })
        .collect();

    Ok(Json(UploadResponse {
        summary: BatchSummary {
            total,
            successful,
            failed,
        },
        items,
    }))
}
