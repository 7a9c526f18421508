//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Errors from the extract and storage
//! crates are wrapped with [`or_raise`](exn::ResultExt::or_raise) so the whole
//! tree is reported.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a library failure.
///
/// ### Operational Errors
/// - [`ErrorKind::Template`]
/// - [`ErrorKind::PathConflict`]
///
/// ### Dependency Errors
/// - [`ErrorKind::Extract`]
/// - [`ErrorKind::Storage`]
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A row could not be decoded or normalized; nothing was indexed.
    #[display("unable to read library export")]
    Extract,
    /// The [`PathGenerator`](crate::PathGenerator) could not compile or render.
    #[display("issue with path generation from template")]
    Template,
    /// The output location exists but is not a directory, two notes would be
    /// written to the same path, or a note path would leave the output
    /// directory. Detected before any write.
    #[display("path conflict: {}", _0.display())]
    PathConflict(#[error(not(source))] PathBuf),
    /// A storage backend operation failed.
    #[display("storage operation failed: {}", _0.display())]
    Storage(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
