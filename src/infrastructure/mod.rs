//! Infrastructure layer: persistence and external integrations.

pub mod persistence;
pub mod remote_storage;
