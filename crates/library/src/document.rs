use folio_extract::models::{Author, Book};
use folio_render::{render_author, render_book};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which kind of note a [`Document`] becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Book,
    Author,
}
impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Author => "author",
        }
    }
}
impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A borrowed record about to become one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document<'a> {
    Book(&'a Book),
    Author(&'a Author),
}
impl Document<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Book(_) => Kind::Book,
            Self::Author(_) => Kind::Author,
        }
    }

    /// Sanitized title for books, exact name for authors.
    pub fn name(&self) -> &str {
        match self {
            Self::Book(book) => &book.title,
            Self::Author(author) => &author.name,
        }
    }

    /// Book ID; authors have none.
    pub fn id(&self) -> &str {
        match self {
            Self::Book(book) => &book.id,
            Self::Author(_) => "",
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Book(book) => render_book(book),
            Self::Author(author) => render_author(author),
        }
    }
}

impl<'a> From<&'a Book> for Document<'a> {
    fn from(book: &'a Book) -> Self {
        Self::Book(book)
    }
}
impl<'a> From<&'a Author> for Document<'a> {
    fn from(author: &'a Author) -> Self {
        Self::Author(author)
    }
}
