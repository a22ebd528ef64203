//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod resolve;
pub mod shorten;
pub mod upload;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use resolve::resolve_handler;
pub use shorten::shorten_handler;
pub use upload::upload_handler;
