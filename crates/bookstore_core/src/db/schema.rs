//! Catalog schema bootstrap.
//!
//! # Responsibility
//! - Create `authors` and `books` when they are absent.
//! - Seed a table only in the same step that created it.
//!
//! # Invariants
//! - `authors` is handled before `books`, so seeded books can reference
//!   seeded authors.
//! - Create + seed of one table is atomic; re-running after success is a
//!   no-op.

use super::seed::SeedData;
use super::DbResult;
use log::{error, info};
use rusqlite::{params, Connection, Transaction};
use std::time::Instant;

pub const AUTHORS_TABLE: &str = "authors";
pub const BOOKS_TABLE: &str = "books";

const CREATE_AUTHORS_SQL: &str = "CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL
);";

const CREATE_BOOKS_SQL: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(50) NOT NULL,
    author INTEGER NOT NULL REFERENCES authors(id) ON DELETE CASCADE
);";

/// Outcome of one `initialize` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    /// `authors` was created (and seeded) by this call.
    pub authors_created: bool,
    /// `books` was created (and seeded) by this call.
    pub books_created: bool,
    pub seeded_authors: usize,
    pub seeded_books: usize,
}

impl InitReport {
    /// Returns whether the call changed the schema at all.
    pub fn created_any(&self) -> bool {
        self.authors_created || self.books_created
    }
}

/// Creates missing catalog tables and seeds each one on first creation.
///
/// # Errors
/// - Returns `DbError::Sqlite` when DDL or seed inserts fail; the failing
///   table's step is rolled back and later steps are skipped.
pub fn initialize(conn: &mut Connection, seed: &SeedData) -> DbResult<InitReport> {
    let started_at = Instant::now();
    match initialize_tables(conn, seed) {
        Ok(report) => {
            info!(
                "event=db_init module=db status=ok authors_created={} books_created={} seeded_authors={} seeded_books={} duration_ms={}",
                report.authors_created,
                report.books_created,
                report.seeded_authors,
                report.seeded_books,
                started_at.elapsed().as_millis()
            );
            Ok(report)
        }
        Err(err) => {
            error!(
                "event=db_init module=db status=error duration_ms={} error_code=db_init_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Returns whether a table with `name` exists in the connected database.
pub fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn initialize_tables(conn: &mut Connection, seed: &SeedData) -> DbResult<InitReport> {
    let mut report = InitReport::default();

    if !table_exists(conn, AUTHORS_TABLE)? {
        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_AUTHORS_SQL)?;
        report.seeded_authors = seed_authors(&tx, seed)?;
        tx.commit()?;
        report.authors_created = true;
    }

    if !table_exists(conn, BOOKS_TABLE)? {
        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_BOOKS_SQL)?;
        report.seeded_books = seed_books(&tx, seed)?;
        tx.commit()?;
        report.books_created = true;
    }

    Ok(report)
}

fn seed_authors(tx: &Transaction<'_>, seed: &SeedData) -> DbResult<usize> {
    let mut stmt = tx.prepare("INSERT INTO authors (first_name, last_name) VALUES (?1, ?2);")?;
    for author in &seed.authors {
        stmt.execute(params![author.first_name, author.last_name])?;
    }
    Ok(seed.authors.len())
}

fn seed_books(tx: &Transaction<'_>, seed: &SeedData) -> DbResult<usize> {
    let mut stmt = tx.prepare("INSERT INTO books (title, author) VALUES (?1, ?2);")?;
    for book in &seed.books {
        stmt.execute(params![book.title, book.author])?;
    }
    Ok(seed.books.len())
}
