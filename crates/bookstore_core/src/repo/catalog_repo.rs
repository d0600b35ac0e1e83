//! Catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `authors`, `genres` and `books`.
//! - Book lookups keyed by author or genre id in place of object-graph
//!   navigation.
//!
//! # Invariants
//! - Deleting an author or genre removes its books through the schema's
//!   cascade rule; nothing here deletes children by hand.

use super::error::{ensure_connection_ready, RepoError, RepoResult};
use super::{delete_by_id, limit_offset_sql};
use crate::db::schema::{AUTHORS, BOOKS, GENRES};
use crate::model::catalog::{Author, AuthorId, Book, BookId, Genre, GenreId, NewBook};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const BOOK_SELECT_SQL: &str = "SELECT
    book_id,
    title,
    price,
    author_id,
    genre_id
FROM books";

/// Filter and pagination options for listing books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookListQuery {
    pub author_id: Option<AuthorId>,
    pub genre_id: Option<GenreId>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for catalog data.
pub trait CatalogRepository {
    fn create_author(&self, name: &str) -> RepoResult<AuthorId>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;

    fn create_genre(&self, name: &str) -> RepoResult<GenreId>;
    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>>;
    fn list_genres(&self) -> RepoResult<Vec<Genre>>;
    fn delete_genre(&self, id: GenreId) -> RepoResult<()>;

    fn create_book(&self, book: &NewBook) -> RepoResult<BookId>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Lists books ordered by id, optionally narrowed to one author/genre.
    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>>;
    fn update_book_price(&self, id: BookId, price: i64) -> RepoResult<()>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed catalog repository.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[AUTHORS, GENRES, BOOKS])?;
        Ok(Self { conn })
    }

    fn list_named(&self, sql: &str) -> RepoResult<Vec<(i64, String)>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push((row.get(0)?, row.get(1)?));
        }
        Ok(items)
    }

    fn get_named(&self, sql: &str, id: i64) -> RepoResult<Option<(i64, String)>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some((row.get(0)?, row.get(1)?)));
        }
        Ok(None)
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn create_author(&self, name: &str) -> RepoResult<AuthorId> {
        self.conn
            .execute("INSERT INTO authors (name) VALUES (?1);", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let found = self.get_named(
            "SELECT author_id, name FROM authors WHERE author_id = ?1;",
            id,
        )?;
        Ok(found.map(|(id, name)| Author { id, name }))
    }

    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let items = self.list_named("SELECT author_id, name FROM authors ORDER BY author_id ASC;")?;
        Ok(items
            .into_iter()
            .map(|(id, name)| Author { id, name })
            .collect())
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        delete_by_id(self.conn, AUTHORS, "author_id", "author", id)
    }

    fn create_genre(&self, name: &str) -> RepoResult<GenreId> {
        self.conn
            .execute("INSERT INTO genres (name) VALUES (?1);", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        let found = self.get_named(
            "SELECT genre_id, name FROM genres WHERE genre_id = ?1;",
            id,
        )?;
        Ok(found.map(|(id, name)| Genre { id, name }))
    }

    fn list_genres(&self) -> RepoResult<Vec<Genre>> {
        let items = self.list_named("SELECT genre_id, name FROM genres ORDER BY genre_id ASC;")?;
        Ok(items
            .into_iter()
            .map(|(id, name)| Genre { id, name })
            .collect())
    }

    fn delete_genre(&self, id: GenreId) -> RepoResult<()> {
        delete_by_id(self.conn, GENRES, "genre_id", "genre", id)
    }

    fn create_book(&self, book: &NewBook) -> RepoResult<BookId> {
        self.conn.execute(
            "INSERT INTO books (title, price, author_id, genre_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![book.title.as_str(), book.price, book.author_id, book.genre_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE book_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>> {
        let mut sql = format!("{BOOK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(author_id) = query.author_id {
            sql.push_str(" AND author_id = ?");
            bind_values.push(Value::Integer(author_id));
        }
        if let Some(genre_id) = query.genre_id {
            sql.push_str(" AND genre_id = ?");
            bind_values.push(Value::Integer(genre_id));
        }

        sql.push_str(" ORDER BY book_id ASC");
        sql.push_str(&limit_offset_sql(query.limit, query.offset));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn update_book_price(&self, id: BookId, price: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE books SET price = ?2 WHERE book_id = ?1;",
            params![id, price],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "book", id });
        }
        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        delete_by_id(self.conn, BOOKS, "book_id", "book", id)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        id: row.get("book_id")?,
        title: row.get("title")?,
        price: row.get("price")?,
        author_id: row.get("author_id")?,
        genre_id: row.get("genre_id")?,
    })
}
