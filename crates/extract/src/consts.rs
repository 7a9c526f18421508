//! Column names of the Goodreads library export, and the detail page URL.

pub const BOOK_ID: &str = "Book Id";
pub const TITLE: &str = "Title";
pub const AUTHOR: &str = "Author";
pub const ADDITIONAL_AUTHORS: &str = "Additional Authors";
pub const PUBLISHER: &str = "Publisher";
pub const MY_RATING: &str = "My Rating";
pub const BOOKSHELVES: &str = "Bookshelves";
pub const MY_REVIEW: &str = "My Review";

/// Every column [`normalize`](crate::normalize) reads. The export carries many
/// more (ISBN, dates, binding, ...) which are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] =
    [BOOK_ID, TITLE, AUTHOR, ADDITIONAL_AUTHORS, PUBLISHER, MY_RATING, BOOKSHELVES, MY_REVIEW];

const BOOK_URL_PREFIX: &str = "https://www.goodreads.com/book/show/";

/// Detail page of a book on Goodreads. Never fetched or validated.
pub fn book_url(id: &str) -> String {
    format!("{BOOK_URL_PREFIX}{id}")
}
