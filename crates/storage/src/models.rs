//! Storage models.

use std::path::PathBuf;
use time::OffsetDateTime;

/// File metadata returned by storage backends when listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Relative path from storage root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modified timestamp
    pub modified: OffsetDateTime,
}
impl FileInfo {
    pub fn new(path: impl Into<PathBuf>, size: u64, modified: impl Into<OffsetDateTime>) -> Self {
        Self {
            path: path.into(),
            size,
            modified: modified.into(),
        }
    }

    /// `true` if the file name ends with `.{extension}` (leading dots on
    /// `extension` are ignored).
    pub fn has_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.path.extension().is_some_and(|ext| ext == extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        let info = FileInfo::new("Authors/A. Writer.md", 10, OffsetDateTime::UNIX_EPOCH);
        assert!(info.has_extension("md"));
        assert!(info.has_extension(".md"));
        assert!(!info.has_extension("txt"));
        let info = FileInfo::new("A. Writer", 10, OffsetDateTime::UNIX_EPOCH);
        assert!(!info.has_extension("md"));
    }
}
