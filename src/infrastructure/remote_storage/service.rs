//! Remote storage trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur while talking to the external storage API.
#[derive(Debug)]
pub enum StorageError {
    /// Transport-level failure (connection, timeout, body read).
    Transport(String),
    /// The API answered with an unexpected status.
    Api { status: u16, body: String },
    /// The API answered 2xx but the payload was missing expected fields.
    MalformedResponse(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "storage transport error: {}", e),
            Self::Api { status, body } => {
                write!(f, "storage API error: status {}, response: {}", status, body)
            }
            Self::MalformedResponse(e) => write!(f, "malformed storage API response: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for remote storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Client for the external file storage API.
///
/// Re-hosting one file is always the same three-call sequence:
/// request a write destination, transfer the bytes, request a public
/// download URL for the stored object. Callers may run the sequences for
/// different files concurrently.
///
/// # Implementations
///
/// - [`crate::infrastructure::remote_storage::YandexDiskStorage`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Requests a one-shot upload destination for the given filename.
    async fn request_upload_url(&self, filename: &str) -> StorageResult<String>;

    /// Transfers the file bytes to the upload destination.
    ///
    /// Returns the stored object's location path, suitable for
    /// [`Self::request_download_url`].
    async fn upload_bytes(&self, upload_url: &str, bytes: Vec<u8>) -> StorageResult<String>;

    /// Requests a public download URL for a stored object.
    async fn request_download_url(&self, location: &str) -> StorageResult<String>;
}
