//! Writing a [`Library`] out as linked notes.
//!
//! Exporting happens in two phases. Planning renders every note and generates
//! its path, authors first then books, and settles path conflicts. Only once
//! the whole plan is known are the notes handed to the storage backend,
//! several at a time. A conflict therefore never leaves a half-written
//! output directory behind. Finally, notes already in the output directory
//! that the export did not produce are reported as stale; they are never
//! deleted.

use async_stream::stream;
use exn::ResultExt;
use folio_storage::backend::{LocalBackend, ReadOnlyBackend};
use folio_storage::error::ErrorKind as StorageErrorKind;
use folio_storage::{BackendHandle, FileInfo, StorageBackend};
use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::instrument;

use crate::document::{Document, Kind};
use crate::error::{ErrorKind, Result};
use crate::template::{DEFAULT_EXTENSION, PathGenerator};
use crate::Library;

/// Maximum number of notes being written at the same time.
pub const MAX_WRITE_CONCURRENCY: usize = 16;

/// What to do when two notes would be written to the same path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Raise [`ErrorKind::PathConflict`] before anything is written.
    #[default]
    Fail,
    /// Keep the note planned last for the path.
    Overwrite,
}

/// A rendered note and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub path: PathBuf,
    pub kind: Kind,
    pub contents: String,
}

/// Progress events emitted by [`Exporter::export`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started): exactly once.
/// 2. [`Planned`](Self::Planned): exactly once, with the number of notes.
/// 3. [`Written`](Self::Written): once per note, in completion order.
/// 4. [`Stale`](Self::Stale): zero or more times, one per note with the
///    export's extension that is in the output directory but was not planned.
/// 5. [`Complete`](Self::Complete): exactly once.
///
/// A planning error terminates the stream right after `Started`. A failed
/// write is yielded as an `Err` item; callers stop consuming at that point,
/// which drops the writes still in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Started,
    Planned(u64),
    Written(PathBuf),
    Stale(FileInfo),
    Complete,
}

pub struct Exporter {
    books: PathGenerator,
    authors: PathGenerator,
    extension: String,
    conflicts: ConflictPolicy,
    concurrency: usize,
}
impl Exporter {
    /// Compiles both path templates.
    pub fn new(book_template: &str, author_template: &str) -> Result<Self> {
        Ok(Self {
            books: book_template.parse()?,
            authors: author_template.parse()?,
            extension: DEFAULT_EXTENSION.to_string(),
            conflicts: ConflictPolicy::default(),
            concurrency: MAX_WRITE_CONCURRENCY,
        })
    }

    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim().trim_matches('.').to_string();
        self
    }

    pub fn with_conflicts(mut self, conflicts: ConflictPolicy) -> Self {
        self.conflicts = conflicts;
        self
    }

    /// Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    fn generator(&self, kind: Kind) -> &PathGenerator {
        match kind {
            Kind::Book => &self.books,
            Kind::Author => &self.authors,
        }
    }

    /// Renders every note of `library`, authors in first-seen order then books
    /// in input order, and checks that no two notes share a path.
    #[instrument(skip_all, fields(books = library.books().len(), authors = library.authors().len()))]
    pub fn plan(&self, library: &Library) -> Result<Vec<Note>> {
        let documents =
            library.authors().iter().map(Document::Author).chain(library.books().iter().map(Document::Book));
        let mut notes: Vec<Note> = Vec::with_capacity(library.authors().len() + library.books().len());
        let mut planned: HashMap<PathBuf, usize> = HashMap::new();
        for document in documents {
            let path = PathBuf::from(self.generator(document.kind()).generate_with_ext(&document, &self.extension)?);
            let note = Note {
                path: path.clone(),
                kind: document.kind(),
                contents: document.render(),
            };
            match planned.get(&path) {
                None => {
                    planned.insert(path, notes.len());
                    notes.push(note);
                },
                Some(_) if self.conflicts == ConflictPolicy::Fail => exn::bail!(ErrorKind::PathConflict(path)),
                Some(&index) => {
                    tracing::warn!(path = %path.display(), replaced = %notes[index].kind, by = %note.kind, "Overwriting conflicting note");
                    notes[index] = note;
                },
            }
        }
        Ok(notes)
    }

    /// Streams [`ExportEvent`]s while writing every note of `library` to
    /// `backend`, up to the configured concurrency at a time. Additional
    /// notes are started as in-flight writes complete.
    pub fn export<'a>(
        &'a self,
        library: &'a Library,
        backend: &'a BackendHandle,
    ) -> impl Stream<Item = Result<ExportEvent>> + 'a {
        // `rustfmt` does not format macros that use braces. Wrap in parentheses!
        stream!({
            yield Ok(ExportEvent::Started);

            let notes = match self.plan(library) {
                Ok(notes) => notes,
                Err(e) => {
                    yield Err(e);
                    return;
                },
            };
            // Infallible: a usize (either 32- or 64-bit) will always fit in a u64.
            yield Ok(ExportEvent::Planned(u64::try_from(notes.len()).unwrap_or(0)));

            let mut pending = notes.iter().map(|note| write_note(backend.as_ref(), note));
            let mut writing = FuturesUnordered::new();
            writing.extend(pending.by_ref().take(self.concurrency));
            while let Some(result) = writing.next().await {
                yield result.map(ExportEvent::Written);
                if let Some(next) = pending.next() {
                    writing.push(next);
                }
            }

            let planned: HashSet<&Path> = notes.iter().map(|note| note.path.as_path()).collect();
            match backend.list(None).await {
                Ok(existing) => {
                    let stale = existing
                        .into_iter()
                        .filter(|file| file.has_extension(&self.extension) && !planned.contains(file.path.as_path()));
                    for file in stale {
                        yield Ok(ExportEvent::Stale(file));
                    }
                },
                Err(e) => tracing::warn!(backend = backend.name(), error = %*e, "Unable to look for stale notes"),
            }

            yield Ok(ExportEvent::Complete);
        })
    }
}

async fn write_note(backend: &(dyn StorageBackend + Send + Sync), note: &Note) -> Result<PathBuf> {
    backend
        .write(&note.path, note.contents.as_bytes())
        .await
        .or_raise(|| ErrorKind::Storage(note.path.clone()))?;
    tracing::debug!(backend = backend.name(), path = %note.path.display(), kind = %note.kind, "Note written");
    Ok(note.path.clone())
}

/// Opens the local directory notes are exported to.
///
/// The directory is created if missing, unless `dry_run` is set: then nothing
/// is created and every write is only logged. An existing file in its place
/// is a [`PathConflict`](ErrorKind::PathConflict).
pub fn output_backend(root: &Path, dry_run: bool) -> Result<BackendHandle> {
    open_backend("output", root, dry_run)
}

/// Opens the directory holding the ID list, returning the backend and the key
/// of the list within it.
pub fn ids_backend(path: &Path, dry_run: bool) -> Result<(BackendHandle, PathBuf)> {
    let file_name = match path.file_name() {
        Some(name) => PathBuf::from(name),
        None => exn::bail!(ErrorKind::Storage(path.to_path_buf())),
    };
    let parent = path.parent().unwrap_or(Path::new("/"));
    Ok((open_backend("ids", parent, dry_run)?, file_name))
}

fn open_backend(name: &str, root: &Path, dry_run: bool) -> Result<BackendHandle> {
    let local = match dry_run {
        true => LocalBackend::open(name, root),
        false => LocalBackend::new(name, root),
    };
    let local = match local {
        Ok(local) => local,
        Err(e) => {
            let kind = match &*e {
                StorageErrorKind::NotADirectory(_) => ErrorKind::PathConflict(root.to_path_buf()),
                _ => ErrorKind::Storage(root.to_path_buf()),
            };
            return Err(e).or_raise(|| kind);
        },
    };
    Ok(match dry_run {
        true => Arc::new(ReadOnlyBackend::new(Arc::new(local))),
        false => Arc::new(local),
    })
}
