//! Utility functions used across the application.
//!
//! - [`short_id`] - Short-ID generation and validation

pub mod short_id;
