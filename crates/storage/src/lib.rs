//! Key → content sinks for rendered notes.
//!
//! Everything is addressed by a path relative to the backend root, validated
//! with [`validate_path`] so nothing ever escapes it.

pub mod backend;
pub mod error;
mod models;
mod path;

pub use crate::backend::StorageBackend;
pub use crate::models::FileInfo;
pub use crate::path::validate as validate_path;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
