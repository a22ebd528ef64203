//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMap, UrlMap};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the mapping store.
///
/// Lookups are exact-match and side-effect free; `insert` is the only
/// write. There is intentionally no update or delete: mappings are
/// immutable.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlMapRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMapRepository: Send + Sync {
    /// Finds a mapping by its short ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short(&self, short: &str) -> Result<Option<UrlMap>, AppError>;

    /// Finds a mapping by its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlMap>, AppError>;

    /// Persists a new mapping and returns it with store-assigned fields.
    ///
    /// The UNIQUE indexes on `original` and `short` are the final arbiter
    /// against racing inserts; the service's pre-checks are only an
    /// early exit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when a uniqueness constraint fires,
    /// [`AppError::Internal`] on other database errors.
    async fn insert(&self, new_map: NewUrlMap) -> Result<UrlMap, AppError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
