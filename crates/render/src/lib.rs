//! Markdown rendering of book and author notes.
//!
//! Rendering is pure: the same record always renders to the same bytes,
//! which is what makes re-running an export idempotent.

pub mod markdown;
mod render;
mod review;

pub use crate::render::{AuthorNote, BookNote, SOURCE, render_author, render_book};
pub use crate::review::translate_review;
