use std::fmt::{Display, Formatter, Result as FmtResult};

use folio_extract::models::{Author, Book, Shelves};
use tracing::instrument;

use crate::markdown::{heading, link_list, tag, url_link, wiki_link};
use crate::translate_review;

/// Source system every note is tagged with.
pub const SOURCE: &str = "Goodreads";

/// Markdown note for a [`Book`]. Rendered through [`Display`].
///
/// ```text
/// # Title
/// #Book #Goodreads
/// - Written by [[Primary]] with [[Second]], [[Third]]
/// - Publisher: Publisher
/// - [Details on Goodreads](https://www.goodreads.com/book/show/123)
/// - My rating: 4 Stars
/// - Shelves: #fiction, #favorites
/// ### My Review
/// Review text
/// ```
///
/// The rating, shelves and review parts only appear when there is something
/// to show.
pub struct BookNote<'a>(pub &'a Book);

impl BookNote<'_> {
    fn authorship(&self) -> String {
        let book = self.0;
        let mut authors = wiki_link(book.primary_author());
        let secondary = book.secondary_authors();
        if !secondary.is_empty() {
            authors.push_str(" with ");
            authors.push_str(&secondary.iter().map(|name| wiki_link(name)).collect::<Vec<_>>().join(", "));
        }
        authors
    }

    fn shelves(shelves: &Shelves) -> String {
        format!("#{}", shelves.as_str().replace(Shelves::SEPARATOR, ", #"))
    }
}

impl Display for BookNote<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let book = self.0;
        write!(f, "{}", heading(&book.title, 1))?;
        writeln!(f, "{} {}", tag("book"), tag(SOURCE))?;
        writeln!(f, "- Written by {}", self.authorship())?;
        writeln!(f, "- Publisher: {}", book.publisher)?;
        writeln!(f, "- {}", url_link(&format!("Details on {SOURCE}"), &book.url))?;
        if book.rating.is_rated() {
            writeln!(f, "- My rating: {} Stars", book.rating)?;
        }
        if !book.shelves.is_empty() {
            writeln!(f, "- Shelves: {}", Self::shelves(&book.shelves))?;
        }
        if !book.review.is_empty() {
            write!(f, "{}", heading("My Review", 3))?;
            writeln!(f, "{}", translate_review(book.review.as_str()))?;
        }
        Ok(())
    }
}

/// Markdown note for an [`Author`]: a heading, the tag line, and one wiki link
/// per book in collection order.
pub struct AuthorNote<'a>(pub &'a Author);

impl Display for AuthorNote<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let author = self.0;
        write!(f, "{}", heading(&author.name, 1))?;
        writeln!(f, "{} {}", tag("author"), tag(SOURCE))?;
        write!(f, "{}", heading("Books in my collection:", 3))?;
        write!(f, "{}", link_list(&author.books, 0))
    }
}

/// Renders the note for a book. Deterministic, no I/O.
#[instrument(level = "trace", skip_all, fields(book_id = %book.id))]
pub fn render_book(book: &Book) -> String {
    BookNote(book).to_string()
}

/// Renders the note for an author. Deterministic, no I/O.
#[instrument(level = "trace", skip_all, fields(author = %author.name))]
pub fn render_author(author: &Author) -> String {
    AuthorNote(author).to_string()
}
