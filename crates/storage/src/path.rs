//! Path validation.
//!
//! Note names come straight from the export (author names, book titles), so
//! the keys handed to a backend are untrusted and must be checked before they
//! are joined to a root directory.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates a storage path and returns it normalized.
///
/// Rejects anything that would leave the storage root (`..` beyond the root,
/// Windows prefixes), NUL bytes, and paths that normalize to nothing. `.`
/// components, repeated and trailing separators are dropped.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use folio_storage::validate_path;
/// // Valid paths
/// assert!(validate_path("A. Writer.md").is_ok());
/// assert!(validate_path("Books/The Hobbit.md").is_ok());
/// assert!(validate_path("Books/../The Hobbit.md").is_ok()); // (never leaves the root)
/// // Invalid paths
/// assert!(validate_path("../outside.md").is_err());
/// assert!(validate_path("Books/../../outside.md").is_err());
/// assert!(validate_path("nul\0.md").is_err());
/// // Paths get resolved
/// assert_eq!(validate_path("./Authors//A. Writer.md").unwrap(), Path::new("Authors/A. Writer.md"));
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let mut components = Vec::new();
    for component in path.as_ref().components() {
        match component {
            Component::Normal(s) => {
                // Null bytes pass through Path::components() on Unix but cause
                // truncation in C-based syscalls.
                if s.as_encoded_bytes().contains(&0) {
                    exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf()));
                }
                components.push(s)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf())),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf()));
                }
            },
        }
    }
    match components.is_empty() {
        true => exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf())),
        false => Ok(components.into_iter().collect()),
    }
}
