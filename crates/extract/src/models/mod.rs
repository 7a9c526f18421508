mod author;
mod book;
mod rating;
mod review;
mod shelves;

pub use self::author::Author;
pub use self::book::Book;
pub use self::rating::Rating;
pub use self::review::Review;
pub use self::shelves::Shelves;
