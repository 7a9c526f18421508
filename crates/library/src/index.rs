//! The in-memory cross reference between books and authors.

use exn::ResultExt;
use folio_extract::error::Result as ExtractResult;
use folio_extract::models::{Author, Book};
use folio_extract::{Row, normalize};
use tracing::instrument;

use crate::authors::Authors;
use crate::error::{ErrorKind, Result};

/// Every book of an export, and every author credited on them.
///
/// Built in one left-to-right pass and read-only afterwards. Each title listed
/// under an author came from a book in [`books`](Self::books) crediting that
/// exact name, so the two sides always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Vec<Book>,
    authors: Authors,
    ids: Vec<String>,
}
impl Library {
    /// Normalizes and indexes every row, in order.
    ///
    /// The first failing row aborts the build; a library is never partially
    /// indexed. No rows gives an empty library.
    #[instrument(level = "debug", skip_all)]
    pub fn build(rows: impl IntoIterator<Item = ExtractResult<Row>>) -> Result<Self> {
        let mut library = Self::default();
        for row in rows {
            let book = row.and_then(|row| normalize(&row)).or_raise(|| ErrorKind::Extract)?;
            library.register(book);
        }
        tracing::info!(books = library.books.len(), authors = library.authors.len(), "Library indexed");
        Ok(library)
    }

    /// Indexes already normalized books, in order.
    pub fn from_books(books: impl IntoIterator<Item = Book>) -> Self {
        let mut library = Self::default();
        books.into_iter().for_each(|book| library.register(book));
        library
    }

    /// Folds one book into the index.
    ///
    /// The title is appended to every credited author once per credit: a name
    /// listed twice on the same book lists the title twice.
    pub fn register(&mut self, book: Book) {
        for name in &book.author_names {
            self.authors.get_or_insert(name).add_book(&book.title);
        }
        self.ids.push(book.id.clone());
        self.books.push(book);
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn authors(&self) -> &Authors {
        &self.authors
    }

    /// Book IDs in input order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn author(&self, name: &str) -> Option<&Author> {
        self.authors.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: &str, title: &str, author: &str, additional: &str) -> ExtractResult<Row> {
        Ok([
            ("Book Id", id),
            ("Title", title),
            ("Author", author),
            ("Additional Authors", additional),
            ("Publisher", "Acme"),
            ("My Rating", "0"),
            ("Bookshelves", ""),
            ("My Review", ""),
        ]
        .into_iter()
        .collect())
    }

    #[test]
    fn test_build_single_row() {
        let library = Library::build([row("123", "Test/Book#1", "A. Writer", "")]).unwrap();
        assert_eq!(library.books().len(), 1);
        assert_eq!(library.books()[0].title, "Test Book1");
        assert_eq!(library.ids(), ["123"]);
        assert_eq!(library.author("A. Writer").unwrap().books, ["Test Book1"]);
    }

    #[test]
    fn test_build_empty() {
        let library = Library::build(std::iter::empty()).unwrap();
        assert!(library.is_empty());
        assert!(library.authors().is_empty());
        assert!(library.ids().is_empty());
    }

    #[test]
    fn test_order_follows_input() {
        let library = Library::build([
            row("3", "Gamma", "Zed", "Amy"),
            row("1", "Alpha", "Amy", ""),
            row("2", "Beta", "Bob", "Zed"),
        ])
        .unwrap();
        assert_eq!(library.ids(), ["3", "1", "2"]);
        assert_eq!(library.authors().names().collect::<Vec<_>>(), ["Zed", "Amy", "Bob"]);
        assert_eq!(library.author("Amy").unwrap().books, ["Gamma", "Alpha"]);
        assert_eq!(library.author("Zed").unwrap().books, ["Gamma", "Beta"]);
    }

    #[test]
    fn test_duplicate_names_in_one_row_duplicate_titles() {
        let library = Library::build([row("1", "Good Omens", "Neil Gaiman", "Terry Pratchett, Neil Gaiman")]).unwrap();
        assert_eq!(library.authors().len(), 2);
        assert_eq!(library.author("Neil Gaiman").unwrap().books, ["Good Omens", "Good Omens"]);
        assert_eq!(library.author("Terry Pratchett").unwrap().books, ["Good Omens"]);
    }

    #[rstest]
    #[case(vec![row("1", "A", "X", "")])]
    #[case(vec![row("1", "A", "X", "Y, Z"), row("2", "B", "Y", ""), row("3", "C", "Z", "X, X")])]
    #[case(vec![row("1", "A", "Orwell, George", "Fyvel, T.R., Crick, Bernard"), row("2", "A", "Fyvel", "")])]
    fn test_credit_counts_match(#[case] rows: Vec<ExtractResult<Row>>) {
        let library = Library::build(rows).unwrap();
        let credits: usize = library.books().iter().map(|book| book.author_names.len()).sum();
        let listed: usize = library.authors().iter().map(|author| author.books.len()).sum();
        assert_eq!(credits, listed);
        for author in library.authors() {
            for title in &author.books {
                assert!(
                    library
                        .books()
                        .iter()
                        .any(|book| &book.title == title && book.author_names.contains(&author.name))
                );
            }
        }
    }

    #[test]
    fn test_missing_field_aborts_build() {
        let broken: Row = [("Book Id", "2"), ("Title", "No Author")].into_iter().collect();
        let err = Library::build([row("1", "Fine", "A", ""), Ok(broken)]).unwrap_err();
        assert_eq!(*err, ErrorKind::Extract);
    }

    #[test]
    fn test_from_books_matches_build() {
        let built = Library::build([row("1", "A", "X", "Y"), row("2", "B", "Y", "")]).unwrap();
        let folded = Library::from_books(built.books().to_vec());
        assert_eq!(built, folded);
    }
}
