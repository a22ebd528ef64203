#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use linkcut::application::services::{MappingService, UploadService};
use linkcut::config::ShortIdConfig;
use linkcut::infrastructure::persistence::SqliteUrlMapRepository;
use linkcut::infrastructure::remote_storage::{RemoteStorage, StorageError, StorageResult};
use linkcut::state::AppState;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

pub fn test_short_id_config() -> ShortIdConfig {
    ShortIdConfig {
        min_len: 0,
        max_len: 16,
        default_length: 6,
        max_generate_attempts: 10,
        reserved_prefixes: vec![
            "api".to_string(),
            "files".to_string(),
            "health".to_string(),
        ],
    }
}

/// Builds an [`AppState`] backed by the given pool, without an upload service.
pub fn create_test_state(pool: SqlitePool) -> AppState {
    let repository = Arc::new(SqliteUrlMapRepository::new(Arc::new(pool)));
    let mappings = Arc::new(MappingService::new(
        repository,
        TEST_BASE_URL.to_string(),
        test_short_id_config(),
    ));

    AppState::new(mappings, None)
}

/// Builds an [`AppState`] whose upload service talks to the given storage fake.
pub fn create_test_state_with_storage(
    pool: SqlitePool,
    storage: Arc<dyn RemoteStorage>,
) -> AppState {
    let repository = Arc::new(SqliteUrlMapRepository::new(Arc::new(pool)));
    let mappings = Arc::new(MappingService::new(
        repository,
        TEST_BASE_URL.to_string(),
        test_short_id_config(),
    ));
    let uploads = Arc::new(UploadService::new(Arc::clone(&mappings), storage));

    AppState::new(mappings, Some(uploads))
}

pub async fn create_test_mapping(pool: &SqlitePool, original: &str, short: &str) {
    sqlx::query("INSERT INTO url_maps (original, short, created_at) VALUES (?, ?, ?)")
        .bind(original)
        .bind(short)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_mappings(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_maps")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// In-memory storage double that succeeds for every file except those
/// whose name starts with `fail`.
pub struct FakeRemoteStorage;

#[async_trait]
impl RemoteStorage for FakeRemoteStorage {
    async fn request_upload_url(&self, filename: &str) -> StorageResult<String> {
        if filename.starts_with("fail") {
            return Err(StorageError::Api {
                status: 507,
                body: "insufficient storage".to_string(),
            });
        }
        Ok(format!("https://upload.example/{filename}"))
    }

    async fn upload_bytes(&self, upload_url: &str, _bytes: Vec<u8>) -> StorageResult<String> {
        // The upload URL embeds the filename; keep stored paths distinct
        // per file so batch uploads yield distinct download URLs.
        let filename = upload_url.rsplit('/').next().unwrap_or("stored");
        Ok(format!("/app/{filename}"))
    }

    async fn request_download_url(&self, location: &str) -> StorageResult<String> {
        Ok(format!("https://download.example{location}"))
    }
}
