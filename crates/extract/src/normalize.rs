use tracing::instrument;

use crate::consts::{self, book_url};
use crate::error::{Error, Result};
use crate::models::Book;
use crate::{Row, sanitize_title};

/// Turns one decoded export row into a [`Book`].
///
/// Pure function of the row. Every required column must be present, even if
/// empty, otherwise [`MissingField`](crate::error::ErrorKind::MissingField) is
/// raised for the first absent one.
///
/// ```
/// use folio_extract::{Row, normalize};
///
/// let row: Row = [
///     ("Book Id", "123"),
///     ("Title", "Test/Book#1"),
///     ("Author", " A. Writer "),
///     ("Additional Authors", ""),
///     ("Publisher", "Acme"),
///     ("My Rating", "4"),
///     ("Bookshelves", "fiction, favorites"),
///     ("My Review", ""),
/// ]
/// .into_iter()
/// .collect();
///
/// let book = normalize(&row).unwrap();
/// assert_eq!(book.title, "Test Book1");
/// assert_eq!(book.author_names, ["A. Writer"]);
/// assert_eq!(book.url, "https://www.goodreads.com/book/show/123");
/// ```
#[instrument(level = "trace", skip_all, fields(book_id))]
pub fn normalize(row: &Row) -> Result<Book> {
    let id = row.get(consts::BOOK_ID)?.to_string();
    tracing::Span::current().record("book_id", id.as_str());
    let mut author_names = vec![row.get(consts::AUTHOR)?.trim().to_string()];
    author_names.extend(additional_authors(row.get(consts::ADDITIONAL_AUTHORS)?));
    Ok(Book {
        url: book_url(&id),
        title: sanitize_title(row.get(consts::TITLE)?),
        author_names,
        publisher: row.get(consts::PUBLISHER)?.to_string(),
        rating: row.get(consts::MY_RATING)?.into(),
        shelves: row.get(consts::BOOKSHELVES)?.into(),
        review: row.get(consts::MY_REVIEW)?.into(),
        id,
    })
}

/// Splits the "Additional Authors" column on every comma.
fn additional_authors(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(',').map(|name| name.trim().to_string()).collect()
}

impl TryFrom<&Row> for Book {
    type Error = Error;
    fn try_from(row: &Row) -> Result<Self> {
        normalize(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{Rating, Review, Shelves};
    use rstest::rstest;

    fn row(overrides: &[(&str, &str)]) -> Row {
        let mut fields = vec![
            ("Book Id", "123"),
            ("Title", "Test/Book#1"),
            ("Author", "A. Writer"),
            ("Additional Authors", ""),
            ("Publisher", "Acme"),
            ("My Rating", "4"),
            ("Bookshelves", "fiction, favorites"),
            ("My Review", ""),
            ("ISBN13", "=\"9780000000000\""),
        ];
        for &(column, value) in overrides {
            match fields.iter_mut().find(|field| field.0 == column) {
                Some(field) => field.1 = value,
                None => fields.push((column, value)),
            }
        }
        fields.into_iter().collect()
    }

    #[test]
    fn test_normalize_basic_row() {
        let book = normalize(&row(&[])).unwrap();
        assert_eq!(
            book,
            Book {
                id: "123".to_string(),
                title: "Test Book1".to_string(),
                author_names: vec!["A. Writer".to_string()],
                publisher: "Acme".to_string(),
                rating: Rating::from("4"),
                shelves: Shelves::from("fiction, favorites"),
                review: Review::default(),
                url: "https://www.goodreads.com/book/show/123".to_string(),
            }
        );
        assert_eq!(book.primary_author(), "A. Writer");
        assert!(book.secondary_authors().is_empty());
    }

    #[rstest]
    #[case("Tolkien, J.R.R.", "", &["Tolkien, J.R.R."])]
    #[case("  Ursula K. Le Guin\t", "", &["Ursula K. Le Guin"])]
    #[case("George Orwell", "T.R. Fyvel, Bernard Crick", &["George Orwell", "T.R. Fyvel", "Bernard Crick"])]
    // Every comma splits, including the one inside a "Last, First" name.
    #[case("Orwell, George", "Fyvel, T.R., Crick, Bernard", &["Orwell, George", "Fyvel", "T.R.", "Crick", "Bernard"])]
    #[case("Neil Gaiman", " Terry Pratchett ", &["Neil Gaiman", "Terry Pratchett"])]
    // Whitespace-only is not empty, it yields one blank secondary author.
    #[case("Neil Gaiman", " ", &["Neil Gaiman", ""])]
    fn test_author_names(#[case] author: &str, #[case] additional: &str, #[case] expected: &[&str]) {
        let book = normalize(&row(&[("Author", author), ("Additional Authors", additional)])).unwrap();
        assert_eq!(book.author_names, expected);
        assert_eq!(book.primary_author(), expected[0]);
        assert_eq!(book.secondary_authors(), &expected[1..]);
    }

    #[test]
    fn test_duplicate_authors_are_kept() {
        let book = normalize(&row(&[("Additional Authors", "A. Writer, B. Writer, B. Writer")])).unwrap();
        assert_eq!(book.author_names, ["A. Writer", "A. Writer", "B. Writer", "B. Writer"]);
    }

    #[test]
    fn test_other_fields_pass_through() {
        let book = normalize(&row(&[
            ("Publisher", "  Spaced Publisher "),
            ("My Rating", "0"),
            ("Bookshelves", ""),
            ("My Review", "Great<br/>read"),
        ]))
        .unwrap();
        assert_eq!(book.publisher, "  Spaced Publisher ");
        assert!(!book.rating.is_rated());
        assert!(book.shelves.is_empty());
        assert_eq!(book.review.as_str(), "Great<br/>read");
    }

    #[rstest]
    #[case("Book Id")]
    #[case("Title")]
    #[case("Author")]
    #[case("Additional Authors")]
    #[case("Publisher")]
    #[case("My Rating")]
    #[case("Bookshelves")]
    #[case("My Review")]
    fn test_missing_field(#[case] column: &'static str) {
        let row: Row = [
            ("Book Id", "1"),
            ("Title", "T"),
            ("Author", "A"),
            ("Additional Authors", ""),
            ("Publisher", "P"),
            ("My Rating", "0"),
            ("Bookshelves", ""),
            ("My Review", ""),
        ]
        .into_iter()
        .filter(|(c, _)| *c != column)
        .collect();
        let err = normalize(&row).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField(column));
    }

    #[test]
    fn test_try_from_row() {
        let book: Book = (&row(&[("Book Id", "987")])).try_into().unwrap();
        assert_eq!(book.url, "https://www.goodreads.com/book/show/987");
    }
}
