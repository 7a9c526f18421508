//! Local filesystem storage backend.
//!
//! Notes are written below a root directory using `tokio::fs`.

use crate::backend::FileInfoStream;
use crate::error::ErrorKind;
use crate::{FileInfo, StorageBackend, error::Result, path::validate as validate_path};
use async_stream::stream;
use async_trait::async_trait;
use exn::ResultExt;
use std::fs::{Metadata, create_dir_all as sync_create_dir};
use std::path::{Path, PathBuf};
use tokio::fs::{self, DirEntry};

enum WalkEntry {
    File(FileInfo),
    Descend(PathBuf),
    Skip,
}

/// Local filesystem storage backend.
///
/// All paths are relative to the configured root directory.
///
/// # Examples
///
/// ```no_run
/// use folio_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("notes", "/home/me/Vault/Goodreads Library")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend, creating the root directory if
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// - [`InvalidPath`](ErrorKind::InvalidPath) if `root` is not absolute.
    /// - [`NotADirectory`](ErrorKind::NotADirectory) if `root` exists but is
    ///   not a directory. Nothing has been written at that point.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let backend = Self::open(name, root)?;
        if !backend.root.exists() {
            // Non-async on purpose: it happens once, before anything else, and
            // an async constructor isn't worth the hassle.
            sync_create_dir(&backend.root).map_err(|e| Self::map_io_error(e, &backend.root))?;
            tracing::debug!(root = %backend.root.display(), "Created storage root");
        }
        Ok(backend)
    }

    /// Same checks as [`new`](Self::new), but a missing root is left alone.
    /// Reads then report [`NotFound`](ErrorKind::NotFound) and listings are
    /// empty.
    pub fn open(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() && !root.is_dir() {
            exn::bail!(ErrorKind::NotADirectory(root));
        }
        Ok(Self { name: name.into(), root })
    }

    /// Validates the path and joins it with the root directory.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    /// Strips the root prefix from an absolute path.
    fn relative_path(&self, absolute: impl AsRef<Path>) -> Result<PathBuf> {
        let absolute = absolute.as_ref();
        let relative = absolute.strip_prefix(&self.root).or_raise(|| {
            ErrorKind::BackendError(format!("path `{:?}` is not within root `{:?}`", absolute, self.root))
        })?;
        validate_path(relative)
    }

    fn metadata(path: &Path, metadata: Metadata) -> Result<FileInfo> {
        let modified = metadata.modified().map_err(ErrorKind::Io)?;
        Ok(FileInfo::new(path, metadata.len(), modified))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotADirectory => ErrorKind::NotADirectory(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }

    /// Errors can't be `?`-ed inside the stream loop; they have to be
    /// converted, yielded, and the loop continued. Doing it here keeps the
    /// loop readable.
    async fn process_entry(&self, entry: DirEntry, prefix: Option<&Path>) -> Result<WalkEntry> {
        let path = entry.path();
        let metadata = entry.metadata().await.map_err(|e| Self::map_io_error(e, &path))?;
        let relative = self.relative_path(&path)?;
        if metadata.is_dir() {
            // Keep descending while the directory could still contain a match.
            return match prefix {
                Some(pfx) if !relative.starts_with(pfx) && !pfx.starts_with(&relative) => Ok(WalkEntry::Skip),
                _ => Ok(WalkEntry::Descend(path)),
            };
        }
        if let Some(pfx) = prefix
            && !relative.starts_with(pfx)
        {
            return Ok(WalkEntry::Skip);
        }
        if metadata.is_file() {
            return Ok(WalkEntry::File(Self::metadata(&relative, metadata)?));
        }
        // Most likely a broken symlink.
        Ok(WalkEntry::Skip)
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_stream<'a>(&'a self, prefix: Option<&'a Path>) -> FileInfoStream<'a> {
        let validated_prefix = match prefix.map(validate_path).transpose() {
            Ok(pfx) => pfx,
            Err(e) => return Box::pin(futures::stream::once(async { Result::Err(e) })),
        };
        let mut stack = vec![self.root.clone()];

        Box::pin(stream! {
            'dirs: while let Some(current) = stack.pop() {
                let mut entries = match fs::read_dir(&current).await {
                    Ok(entries) => entries,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                    Err(err) => {
                        yield Err(exn::Exn::from(Self::map_io_error(err, &current)));
                        continue 'dirs;
                    }
                };

                'entries: loop {
                    let entry = match entries.next_entry().await {
                        Ok(Some(entry)) => entry,
                        Ok(None) => break 'entries,
                        Err(e) => { yield Err(exn::Exn::from(Self::map_io_error(e, &current))); continue 'entries; },
                    };
                    match self.process_entry(entry, validated_prefix.as_deref()).await {
                        Ok(WalkEntry::File(f)) => yield Ok(f),
                        Ok(WalkEntry::Descend(d)) => stack.push(d),
                        Ok(WalkEntry::Skip) => {},
                        Err(e) => yield Err(e),
                    };
                }
            }
        })
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::read(&abs_path).await.map_err(|e| Self::map_io_error(e, path))?)
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| Self::map_io_error(e, path))?;
        }
        Ok(fs::write(&abs_path, data).await.map_err(|e| Self::map_io_error(e, path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_absolute_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(LocalBackend::new("notes", temp_dir.path()).is_ok());
        assert!(LocalBackend::new("notes", "Goodreads Library").is_err());
        assert!(LocalBackend::new("notes", "./relative").is_err());
    }

    #[test]
    fn test_new_creates_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("Goodreads Library");
        LocalBackend::new("notes", &root).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_new_rejects_file_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("Goodreads Library");
        std::fs::write(&root, b"not a directory").unwrap();
        let err = LocalBackend::new("notes", &root).err().unwrap();
        assert!(matches!(&*err, ErrorKind::NotADirectory(p) if p == &root));
        // Untouched
        assert_eq!(std::fs::read(&root).unwrap(), b"not a directory");
    }

    #[tokio::test]
    async fn test_open_leaves_missing_root_alone() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("Goodreads Library");
        let backend = LocalBackend::open("notes", &root).unwrap();
        assert!(!root.exists());
        assert!(backend.list(None).await.unwrap().is_empty());
        let err = backend.read(Path::new("libraryIds.txt")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));

        std::fs::write(&root, b"file").unwrap();
        assert!(LocalBackend::open("notes", &root).is_err());
    }

    #[test]
    fn test_absolute_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("notes", temp_dir.path()).unwrap();
        let expected = temp_dir.path().join("Test Book1.md");
        assert_eq!(backend.absolute_path(Path::new("Test Book1.md")).unwrap(), expected);
        assert!(backend.absolute_path(Path::new("../escape.md")).is_err());
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("notes", temp_dir.path()).unwrap();
        let note = "# A. Writer\n#Author #Goodreads\n".as_bytes();
        backend.write(Path::new("A. Writer.md"), note).await.unwrap();
        assert_eq!(backend.read(Path::new("A. Writer.md")).await.unwrap(), note);
        assert_eq!(std::fs::read(temp_dir.path().join("A. Writer.md")).unwrap(), note);
    }

    #[tokio::test]
    async fn test_write_replaces_contents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("notes", temp_dir.path()).unwrap();
        backend.write(Path::new("note.md"), b"a much longer first version").await.unwrap();
        backend.write(Path::new("note.md"), b"short").await.unwrap();
        assert_eq!(backend.read(Path::new("note.md")).await.unwrap(), b"short");
    }

    #[tokio::test]
    async fn test_write_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("notes", temp_dir.path()).unwrap();
        backend.write(Path::new("AC/DC.md"), b"data").await.unwrap();
        assert!(temp_dir.path().join("AC").join("DC.md").is_file());
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("notes", temp_dir.path()).unwrap();
        let err = backend.read(Path::new("missing.md")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("notes", temp_dir.path()).unwrap();
        assert!(backend.list(None).await.unwrap().is_empty());
        backend.write(Path::new("One.md"), b"1").await.unwrap();
        backend.write(Path::new("Books/Two.md"), b"22").await.unwrap();
        backend.write(Path::new("Books/Nested/Three.md"), b"333").await.unwrap();
        let mut files = backend.list(None).await.unwrap();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        let paths: Vec<_> = files.iter().map(|f| f.path.as_path()).collect();
        assert_eq!(paths, [Path::new("Books/Nested/Three.md"), Path::new("Books/Two.md"), Path::new("One.md")]);
        assert_eq!(files[0].size, 3);
    }

    #[tokio::test]
    async fn test_list_with_prefix() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("notes", temp_dir.path()).unwrap();
        backend.write(Path::new("Books/Sub/file.md"), b"data").await.unwrap();
        backend.write(Path::new("Books/Subdir/file.md"), b"data").await.unwrap();
        backend.write(Path::new("Books/Subfile.md"), b"data").await.unwrap();
        let mut files = backend.list(Some(Path::new("Books/Sub"))).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files.pop().unwrap().path, Path::new("Books/Sub/file.md"));
        assert!(backend.list(Some(Path::new("nonexistent/"))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_path_security() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("notes", temp_dir.path()).unwrap();
        assert!(backend.read(Path::new("../etc/passwd")).await.is_err());
        assert!(backend.write(Path::new("../escape.md"), b"data").await.is_err());
        assert!(backend.list(Some(Path::new("a/../../b"))).await.is_err());
    }
}
