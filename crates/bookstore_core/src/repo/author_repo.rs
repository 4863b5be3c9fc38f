//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/delete APIs over the `authors` table.
//!
//! # Invariants
//! - Authors are never updated in place.
//! - Deleting an author cascades to its books through the foreign key; the
//!   connection must have `foreign_keys=ON` (see `db::open_db`).

use super::RepoResult;
use crate::model::author::{Author, AuthorId, NewAuthor};
use rusqlite::{params, Connection, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT id, first_name, last_name FROM authors";

/// Repository interface for author persistence.
pub trait AuthorRepository {
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Inserts one author and returns it with the storage-assigned id.
    fn create_author(&self, author: &NewAuthor) -> RepoResult<Author>;
    /// Deletes one author (and, by cascade, its books).
    ///
    /// Returns the deleted row, or `None` when no author had `id`.
    fn delete_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let authors = stmt
            .query_map([], parse_author_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(authors)
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let author = self
            .conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_author_row,
            )
            .optional()?;
        Ok(author)
    }

    fn create_author(&self, author: &NewAuthor) -> RepoResult<Author> {
        self.conn.execute(
            "INSERT INTO authors (first_name, last_name) VALUES (?1, ?2);",
            params![author.first_name, author.last_name],
        )?;

        Ok(author.clone().with_id(self.conn.last_insert_rowid()))
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let Some(existing) = self.get_author(id)? else {
            return Ok(None);
        };

        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(existing))
    }
}

fn parse_author_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}
