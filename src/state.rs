//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{MappingService, UploadService};
use crate::infrastructure::persistence::SqliteUrlMapRepository;

/// Application state shared across all request handlers.
///
/// Services are wrapped in [`Arc`] so cloning the state per request is
/// cheap. `uploads` is `None` when no storage credential is configured;
/// the upload endpoint rejects requests in that case.
#[derive(Clone)]
pub struct AppState {
    pub mappings: Arc<MappingService<SqliteUrlMapRepository>>,
    pub uploads: Option<Arc<UploadService<SqliteUrlMapRepository>>>,
}

impl AppState {
    pub fn new(
        mappings: Arc<MappingService<SqliteUrlMapRepository>>,
        uploads: Option<Arc<UploadService<SqliteUrlMapRepository>>>,
    ) -> Self {
        Self { mappings, uploads }
    }
}
