pub mod mapping_service;
pub mod upload_service;

pub use mapping_service::MappingService;
pub use upload_service::{RehostedLink, UploadItem, UploadService, UploadedFile};
