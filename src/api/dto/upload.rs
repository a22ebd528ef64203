//! DTOs for the file upload endpoint.

use serde::Serialize;

use crate::error::ErrorInfo;

/// Response containing per-file upload results.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub summary: BatchSummary,
    pub items: Vec<UploadResultItem>,
}

/// Individual result for a file in the batch.
///
/// Uses untagged enum for cleaner JSON structure (no discriminator field).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadResultItem {
    Success {
        filename: String,
        url: String,
        short_link: String,
    },
    Error {
        filename: String,
        error: ErrorInfo,
    },
}

/// Summary statistics for batch processing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}
