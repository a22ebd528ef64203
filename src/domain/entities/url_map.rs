//! URL mapping entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The persisted association between an original URL and its short ID.
///
/// Mappings are immutable once created: there is no update or delete
/// operation anywhere in the system.
#[derive(Debug, Clone, FromRow)]
pub struct UrlMap {
    pub id: i64,
    pub original: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMap {
    /// Creates a new UrlMap instance.
    pub fn new(id: i64, original: String, short: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original,
            short,
            created_at,
        }
    }
}

/// Input data for creating a new mapping.
///
/// `id` and `created_at` are assigned by the store at insert time.
#[derive(Debug, Clone)]
pub struct NewUrlMap {
    pub original: String,
    pub short: String,
}
