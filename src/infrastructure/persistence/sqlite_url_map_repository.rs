//! SQLite implementation of the URL mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMap, UrlMap};
use crate::domain::repositories::UrlMapRepository;
use crate::error::AppError;

/// SQLite repository for mapping storage and retrieval.
///
/// Uses prepared statements throughout. The UNIQUE indexes created by the
/// migrations are what makes concurrent duplicate inserts fail reliably;
/// nothing here takes application-level locks.
pub struct SqliteUrlMapRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlMapRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlMapRepository for SqliteUrlMapRepository {
    async fn find_by_short(&self, short: &str) -> Result<Option<UrlMap>, AppError> {
        let map = sqlx::query_as::<_, UrlMap>(
            r#"
            SELECT id, original, short, created_at
            FROM url_maps
            WHERE short = ?
            "#,
        )
        .bind(short)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(map)
    }

    async fn find_by_original(&self, original: &str) -> Result<Option<UrlMap>, AppError> {
        let map = sqlx::query_as::<_, UrlMap>(
            r#"
            SELECT id, original, short, created_at
            FROM url_maps
            WHERE original = ?
            "#,
        )
        .bind(original)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(map)
    }

    async fn insert(&self, new_map: NewUrlMap) -> Result<UrlMap, AppError> {
        let map = sqlx::query_as::<_, UrlMap>(
            r#"
            INSERT INTO url_maps (original, short, created_at)
            VALUES (?, ?, ?)
            RETURNING id, original, short, created_at
            "#,
        )
        .bind(&new_map.original)
        .bind(&new_map.short)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(map)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;

        Ok(())
    }
}
