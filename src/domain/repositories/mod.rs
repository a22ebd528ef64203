//! Repository traits defining data access contracts.

pub mod url_map_repository;

pub use url_map_repository::UrlMapRepository;

#[cfg(test)]
pub use url_map_repository::MockUrlMapRepository;
