use super::{Rating, Review, Shelves};

/// One book of the export, normalized.
///
/// Built once by [`normalize`](crate::normalize) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    /// Goodreads book ID, opaque
    pub id: String,
    /// Sanitized title, see [`sanitize_title`](crate::sanitize_title)
    pub title: String,
    /// Primary author first, then any additional authors, in export order.
    /// Never empty; duplicates are kept.
    pub author_names: Vec<String>,
    pub publisher: String,
    pub rating: Rating,
    pub shelves: Shelves,
    pub review: Review,
    /// Detail page on Goodreads
    pub url: String,
}
impl Book {
    pub fn primary_author(&self) -> &str {
        self.author_names.first().map(String::as_str).unwrap_or_default()
    }

    pub fn secondary_authors(&self) -> &[String] {
        self.author_names.get(1..).unwrap_or_default()
    }
}

impl AsRef<Book> for Book {
    fn as_ref(&self) -> &Book {
        self
    }
}
