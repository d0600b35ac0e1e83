//! Catalog records: authors, genres and books.

use serde::{Deserialize, Serialize};

pub type AuthorId = i64;
pub type GenreId = i64;
pub type BookId = i64;

/// Max stored length of `Author::name`, in characters.
pub const AUTHOR_NAME_MAX_CHARS: usize = 64;
/// Max stored length of `Genre::name`, in characters.
pub const GENRE_NAME_MAX_CHARS: usize = 32;
/// Max stored length of `Book::title`, in characters.
pub const BOOK_TITLE_MAX_CHARS: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// A book listed for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Price in minor currency units. Storage rejects values `<= 0`.
    pub price: i64,
    pub author_id: AuthorId,
    pub genre_id: GenreId,
}

/// Insert payload for [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub price: i64,
    pub author_id: AuthorId,
    pub genre_id: GenreId,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        price: i64,
        author_id: AuthorId,
        genre_id: GenreId,
    ) -> Self {
        Self {
            title: title.into(),
            price,
            author_id,
            genre_id,
        }
    }
}
