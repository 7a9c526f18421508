//! Decoding and normalization of Goodreads library exports.
//!
//! [`ExportReader`] turns the delimited export into [`Row`]s, and
//! [`normalize`] turns each row into a [`Book`](models::Book).

mod consts;
pub mod error;
pub mod models;
mod normalize;
mod reader;
mod row;
mod sanitize;

pub use crate::consts::{REQUIRED_COLUMNS, book_url};
pub use crate::normalize::normalize;
pub use crate::reader::ExportReader;
pub use crate::row::Row;
pub use crate::sanitize::sanitize_title;
