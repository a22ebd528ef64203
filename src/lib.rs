//! # Linkcut
//!
//! A URL-shortening service built with Axum and SQLite, with optional
//! file re-hosting through the Yandex Disk API.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Business logic and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Database and external storage integrations
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or caller-chosen short identifiers with reserved-prefix protection
//! - Duplicate-URL detection that reports the existing short link
//! - Batch file upload: re-host on remote storage, shorten the download URL
//! - Structured JSON errors with machine-readable codes
//!
//! ## Quick Start
//!
//! ```bash
//! # All settings have defaults; the database file is created on startup
//! export DATABASE_URL="sqlite://shortener.db"
//! export BASE_URL="http://localhost:3000"
//! export DISK_TOKEN="..."   # optional, enables POST /api/files
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{MappingService, UploadService, UploadedFile};
    pub use crate::domain::entities::{NewUrlMap, UrlMap};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
