//! Yandex Disk implementation of the remote storage client.
//!
//! Files are written into the application folder (`app:/`) with overwrite
//! enabled, then exposed through the public download-link endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, LOCATION};
use serde::Deserialize;

use super::service::{RemoteStorage, StorageError, StorageResult};

const API_BASE: &str = "https://cloud-api.yandex.net/v1/disk";

/// Cloud API responses carry the interesting URL in an `href` field.
#[derive(Debug, Deserialize)]
struct HrefResponse {
    href: Option<String>,
}

/// Yandex Disk client authenticated with a process-wide OAuth token.
pub struct YandexDiskStorage {
    client: reqwest::Client,
    api_base: String,
}

impl YandexDiskStorage {
    /// Creates a client with the OAuth token baked into default headers.
    ///
    /// # Errors
    ///
    /// Fails if the token contains characters invalid in an HTTP header.
    pub fn new(token: &str) -> anyhow::Result<Self> {
        Self::with_api_base(token, API_BASE)
    }

    /// Same as [`Self::new`] with an overridable API base, for tests.
    pub fn with_api_base(token: &str, api_base: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("OAuth {token}"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_href(&self, endpoint: &str, path: &str) -> StorageResult<String> {
        let mut params = vec![("path", path), ("fields", "href")];
        if endpoint == "upload" {
            params.push(("overwrite", "true"));
        }

        let response = self
            .client
            .get(format!("{}/resources/{}", self.api_base, endpoint))
            .query(&params)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: HrefResponse = response
            .json()
            .await
            .map_err(|e| StorageError::MalformedResponse(e.to_string()))?;

        body.href
            .ok_or_else(|| StorageError::MalformedResponse("missing 'href' field".to_string()))
    }
}

#[async_trait]
impl RemoteStorage for YandexDiskStorage {
    async fn request_upload_url(&self, filename: &str) -> StorageResult<String> {
        self.fetch_href("upload", &format!("app:/{filename}")).await
    }

    async fn upload_bytes(&self, upload_url: &str, bytes: Vec<u8>) -> StorageResult<String> {
        let response = self
            .client
            .put(upload_url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                StorageError::MalformedResponse("missing 'Location' header".to_string())
            })?;

        // The header is percent-encoded and prefixed with the service's
        // own /disk namespace, which the download endpoint does not accept.
        let location = urlencoding::decode(location)
            .map_err(|e| StorageError::MalformedResponse(e.to_string()))?;
        let location = location.strip_prefix("/disk").unwrap_or(&location);

        Ok(location.to_string())
    }

    async fn request_download_url(&self, location: &str) -> StorageResult<String> {
        self.fetch_href("download", location).await
    }
}
