//! DTOs for the shortening and resolution endpoints.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048, message = "URL is too long"))]
    #[validate(custom(function = validate_http_scheme))]
    pub url: String,

    /// Optional caller-chosen short identifier. Blank values are treated
    /// the same as absent and a random identifier is generated instead.
    pub custom_id: Option<String>,
}

/// Only http and https URLs are shortenable; `#[validate(url)]` alone
/// admits any parseable scheme.
fn validate_http_scheme(value: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(value).map_err(|_| ValidationError::new("invalid_url"))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ValidationError::new("unsupported_scheme")),
    }
}

/// Response for a created mapping.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub url: String,
    pub short_link: String,
}

/// Response for a short identifier lookup.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub url: String,
}
