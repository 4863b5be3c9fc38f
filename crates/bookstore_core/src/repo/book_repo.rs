//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `books` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Updates change `title` and `author` only; `id` is immutable.
//! - Title uniqueness is NOT checked here; callers go through
//!   `BookService` for that.
//! - A dangling `author` reference fails with
//!   `RepoError::ConstraintViolation` from the foreign key.

use super::RepoResult;
use crate::model::author::AuthorId;
use crate::model::book::{Book, BookId, NewBook};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BOOK_SELECT_SQL: &str = "SELECT id, title, author FROM books";

/// Repository interface for book persistence.
pub trait BookRepository {
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    fn list_books_by_author(&self, author: AuthorId) -> RepoResult<Vec<Book>>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Exact, case-sensitive title lookup.
    fn get_book_by_title(&self, title: &str) -> RepoResult<Option<Book>>;
    /// Inserts one book and returns it with the storage-assigned id.
    fn create_book(&self, book: &NewBook) -> RepoResult<Book>;
    /// Rewrites `title`/`author` of the row with `book.id`.
    ///
    /// Returns the stored row, or `None` when no book had that id.
    fn update_book(&self, book: &Book) -> RepoResult<Option<Book>>;
    /// Returns the deleted row, or `None` when no book had `id`.
    fn delete_book(&self, id: BookId) -> RepoResult<Option<Book>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_books(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(sql)?;
        let books = stmt
            .query_map(params, parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }

    fn query_book(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Option<Book>> {
        let book = self
            .conn
            .query_row(sql, params, parse_book_row)
            .optional()?;
        Ok(book)
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.query_books(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn list_books_by_author(&self, author: AuthorId) -> RepoResult<Vec<Book>> {
        self.query_books(
            &format!("{BOOK_SELECT_SQL} WHERE author = ?1 ORDER BY id ASC;"),
            [author],
        )
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.query_book(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"), [id])
    }

    fn get_book_by_title(&self, title: &str) -> RepoResult<Option<Book>> {
        self.query_book(
            &format!("{BOOK_SELECT_SQL} WHERE title = ?1 ORDER BY id ASC LIMIT 1;"),
            [title],
        )
    }

    fn create_book(&self, book: &NewBook) -> RepoResult<Book> {
        self.conn.execute(
            "INSERT INTO books (title, author) VALUES (?1, ?2);",
            params![book.title, book.author],
        )?;

        Ok(book.clone().with_id(self.conn.last_insert_rowid()))
    }

    fn update_book(&self, book: &Book) -> RepoResult<Option<Book>> {
        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                author = ?2
             WHERE id = ?3;",
            params![book.title, book.author, book.id],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(book.clone()))
    }

    fn delete_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let Some(existing) = self.get_book(id)? else {
            return Ok(None);
        };

        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(existing))
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
    })
}
