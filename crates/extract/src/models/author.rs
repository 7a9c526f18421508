use std::fmt::{Display, Formatter, Result as FmtResult};

/// A distinct author name, and the titles credited to it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Author {
    /// Exact (trimmed) name as it appears in the export
    pub name: String,
    /// Titles in the order they were encountered. Append-only; a title added
    /// twice is listed twice.
    pub books: Vec<String>,
}
impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            books: Vec::new(),
        }
    }

    pub fn add_book(&mut self, title: impl Into<String>) {
        self.books.push(title.into());
    }
}

impl AsRef<Author> for Author {
    fn as_ref(&self) -> &Author {
        self
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}
