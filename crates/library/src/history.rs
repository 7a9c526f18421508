//! The list of exported book IDs, and what changed since the last export.

use exn::ResultExt;
use folio_storage::BackendHandle;
use folio_storage::error::ErrorKind as StorageErrorKind;
use std::collections::HashSet;
use std::path::Path;
use tracing::instrument;

use crate::Library;
use crate::error::{ErrorKind, Result};

/// Book IDs written by a previous export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdHistory {
    ids: HashSet<String>,
}
impl IdHistory {
    /// One ID per line; surrounding whitespace and blank lines are ignored.
    pub fn parse(contents: &str) -> Self {
        Self {
            ids: contents.lines().map(str::trim).filter(|id| !id.is_empty()).map(str::to_string).collect(),
        }
    }

    /// Reads the list at `path`, or `None` when there was no previous export.
    pub async fn load(backend: &BackendHandle, path: &Path) -> Result<Option<Self>> {
        match backend.read(path).await {
            Ok(data) => Ok(Some(Self::parse(&String::from_utf8_lossy(&data)))),
            Err(e) if matches!(&*e, StorageErrorKind::NotFound(_)) => Ok(None),
            Err(e) => Err(e).or_raise(|| ErrorKind::Storage(path.to_path_buf())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// IDs of `library` that were not in this history, in input order.
    pub fn added<'a>(&self, library: &'a Library) -> Vec<&'a str> {
        library.ids().iter().map(String::as_str).filter(|id| !self.contains(id)).collect()
    }
}

/// Every ID on its own newline-terminated line, in input order.
pub fn render_ids(library: &Library) -> String {
    library.ids().iter().map(|id| format!("{id}\n")).collect()
}

/// Replaces the ID list at `path`, returning the IDs that were not in the
/// previous list (all of them when there was none).
#[instrument(skip_all, fields(backend = backend.name(), path = %path.display()))]
pub async fn save_ids(library: &Library, backend: &BackendHandle, path: &Path) -> Result<Vec<String>> {
    let added: Vec<String> = match IdHistory::load(backend, path).await? {
        Some(history) => history.added(library).into_iter().map(str::to_string).collect(),
        None => library.ids().to_vec(),
    };
    backend
        .write(path, render_ids(library).as_bytes())
        .await
        .or_raise(|| ErrorKind::Storage(path.to_path_buf()))?;
    tracing::info!(total = library.ids().len(), added = added.len(), "Book IDs saved");
    Ok(added)
}
