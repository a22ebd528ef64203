//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation
//! inputs use a separate `New*` struct, leaving store-assigned fields
//! (`id`, `created_at`) out of caller hands.

pub mod url_map;

pub use url_map::{NewUrlMap, UrlMap};
