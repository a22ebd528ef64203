//! External storage API integration for file re-hosting.

pub mod service;
pub mod yandex_disk;

pub use service::{RemoteStorage, StorageError, StorageResult};
pub use yandex_disk::YandexDiskStorage;

#[cfg(test)]
pub use service::MockRemoteStorage;
