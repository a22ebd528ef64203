//! File re-hosting service: upload to remote storage, then shorten.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::application::services::MappingService;
use crate::domain::repositories::UrlMapRepository;
use crate::error::AppError;
use crate::infrastructure::remote_storage::RemoteStorage;

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Outcome for one file in a batch.
#[derive(Debug)]
pub struct UploadItem {
    pub filename: String,
    pub result: Result<RehostedLink, AppError>,
}

/// A successfully re-hosted and shortened file.
#[derive(Debug, Clone)]
pub struct RehostedLink {
    /// Public download URL issued by the storage API.
    pub original: String,
    pub short: String,
    pub short_link: String,
}

/// Service that turns uploaded files into short links.
///
/// Each file goes through the same pipeline: request an upload
/// destination, transfer the bytes, request a public download URL, then
/// shorten that URL through the mapping service. Files are processed
/// concurrently with no bound on parallelism, which is fine for the small
/// batches an interactive upload produces.
///
/// A failure affects only its own file; the batch always reports one
/// result per input file, in input order.
pub struct UploadService<R: UrlMapRepository> {
    mappings: Arc<MappingService<R>>,
    storage: Arc<dyn RemoteStorage>,
}

impl<R: UrlMapRepository + 'static> UploadService<R> {
    /// Creates a new upload service.
    pub fn new(mappings: Arc<MappingService<R>>, storage: Arc<dyn RemoteStorage>) -> Self {
        Self { mappings, storage }
    }

    /// Re-hosts a batch of files and shortens their download URLs.
    pub async fn upload_and_shorten(&self, files: Vec<UploadedFile>) -> Vec<UploadItem> {
        let mut tasks = JoinSet::new();

        for (index, file) in files.into_iter().enumerate() {
            let mappings = Arc::clone(&self.mappings);
            let storage = Arc::clone(&self.storage);

            tasks.spawn(async move {
                let filename = file.filename.clone();
                let result = process_file(mappings, storage, file).await;
                (index, UploadItem { filename, result })
            });
        }

        let mut items: Vec<(usize, UploadItem)> = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => items.push(entry),
                Err(e) => {
                    // A panicked task loses its index, so it cannot be
                    // reported per-file; log and keep the rest of the batch.
                    tracing::error!("upload task failed to join: {e}");
                }
            }
        }

        items.sort_by_key(|(index, _)| *index);
        items.into_iter().map(|(_, item)| item).collect()
    }
}

/// Runs the three storage calls and the shorten step for one file.
async fn process_file<R: UrlMapRepository>(
    mappings: Arc<MappingService<R>>,
    storage: Arc<dyn RemoteStorage>,
    file: UploadedFile,
) -> Result<RehostedLink, AppError> {
    let filename = file.filename;

    let upload_url = storage
        .request_upload_url(&filename)
        .await
        .map_err(|e| AppError::upload_failed(&filename, e.to_string()))?;

    let location = storage
        .upload_bytes(&upload_url, file.bytes)
        .await
        .map_err(|e| AppError::upload_failed(&filename, e.to_string()))?;

    let download_url = storage
        .request_download_url(&location)
        .await
        .map_err(|e| AppError::upload_failed(&filename, e.to_string()))?;

    let map = mappings.create_mapping(download_url, None).await?;
    let short_link = mappings.short_link(&map.short);

    Ok(RehostedLink {
        original: map.original,
        short: map.short,
        short_link,
    })
}
