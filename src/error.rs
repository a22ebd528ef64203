//! Application error type and HTTP response mapping.
//!
//! Every expected failure in the create/resolve/upload flows is a distinct
//! variant so callers can react to the specific condition. All variants
//! serialize to `{ "error": { code, message, details } }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Structured error payload shared by HTTP responses and batch result items.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// A custom short ID failed the length or character-class checks.
    #[error("{message}")]
    InvalidShortFormat { message: String, details: Value },

    /// A custom or generated short ID collides with an existing mapping
    /// or a reserved prefix.
    #[error("{message}")]
    ShortAlreadyExists { message: String, details: Value },

    /// The original URL already has a mapping; carries its short link.
    #[error("this URL was already shortened: {short_link}")]
    DuplicateOriginal { short_link: String },

    /// The generation loop hit its attempt cap without finding a free ID.
    #[error("{message}")]
    IdSpaceExhausted { message: String },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// An external storage API step failed for one file.
    #[error("upload failed for '{filename}': {message}")]
    UploadFailed { filename: String, message: String },

    /// Malformed input that is not specifically a short-ID format problem.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A storage-level uniqueness constraint fired. The mapping service
    /// re-reads to turn this into `ShortAlreadyExists` or
    /// `DuplicateOriginal`; it only reaches clients when disambiguation
    /// is impossible.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_short_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidShortFormat {
            message: message.into(),
            details,
        }
    }

    pub fn short_already_exists(message: impl Into<String>, details: Value) -> Self {
        Self::ShortAlreadyExists {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_original(short_link: impl Into<String>) -> Self {
        Self::DuplicateOriginal {
            short_link: short_link.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn upload_failed(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UploadFailed {
            filename: filename.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Converts the error into the serializable payload used both in HTTP
    /// bodies and in per-file upload result items.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            Self::InvalidShortFormat { details, .. } => ("invalid_short_format", details.clone()),
            Self::ShortAlreadyExists { details, .. } => ("short_already_exists", details.clone()),
            Self::DuplicateOriginal { short_link } => {
                ("duplicate_original", json!({ "short_link": short_link }))
            }
            Self::IdSpaceExhausted { .. } => ("id_space_exhausted", json!({})),
            Self::NotFound { details, .. } => ("not_found", details.clone()),
            Self::UploadFailed { filename, .. } => {
                ("upload_failed", json!({ "filename": filename }))
            }
            Self::Validation { details, .. } => ("validation_error", details.clone()),
            Self::Conflict { details, .. } => ("conflict", details.clone()),
            Self::Internal { details, .. } => ("internal_error", details.clone()),
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidShortFormat { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::ShortAlreadyExists { .. }
            | Self::DuplicateOriginal { .. }
            | Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UploadFailed { .. } => StatusCode::BAD_GATEWAY,
            Self::IdSpaceExhausted { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!("database error: {e}");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_original_carries_short_link() {
        let err = AppError::duplicate_original("http://localhost:3000/abc123");
        let info = err.to_error_info();

        assert_eq!(info.code, "duplicate_original");
        assert_eq!(info.details["short_link"], "http://localhost:3000/abc123");
        assert!(info.message.contains("http://localhost:3000/abc123"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_short_format("bad", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::short_already_exists("taken", json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::duplicate_original("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::upload_failed("a.txt", "boom").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::internal("oops", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upload_failed_names_the_file() {
        let err = AppError::upload_failed("report.pdf", "status 500");
        assert!(err.to_string().contains("report.pdf"));
        assert_eq!(err.to_error_info().details["filename"], "report.pdf");
    }
}
