//! Database-backed repository implementations.

pub mod sqlite_url_map_repository;

pub use sqlite_url_map_repository::SqliteUrlMapRepository;
