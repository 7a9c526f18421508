//! Cross-referencing books and authors, and exporting them as linked notes.
//!
//! [`Library::build`] folds the rows of an export into books and authors,
//! [`Exporter`] renders them and writes one note per book and per author, and
//! [`save_ids`] keeps the list of exported book IDs up to date.

mod authors;
mod document;
pub mod error;
mod export;
mod history;
mod index;
mod template;

pub use crate::authors::Authors;
pub use crate::document::{Document, Kind};
pub use crate::export::{
    ConflictPolicy, ExportEvent, Exporter, MAX_WRITE_CONCURRENCY, Note, ids_backend, output_backend,
};
pub use crate::history::{IdHistory, render_ids, save_ids};
pub use crate::index::Library;
pub use crate::template::{DEFAULT_EXTENSION, DEFAULT_TEMPLATE, PathGenerator};
