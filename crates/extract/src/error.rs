//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The export file does not exist.
    #[display("could not find {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The export file exists but could not be opened or read.
    #[display("could not read {}", _0.display())]
    Unreadable(#[error(not(source))] PathBuf),
    /// The delimited text is too broken to decode.
    #[display("malformed CSV near line {_0}")]
    MalformedCsv(#[error(not(source))] u64),
    /// A required column is absent from a row.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The export is either complete and well-formed or it isn't; running
        // the same pass again over the same file changes nothing.
        false
    }
}
