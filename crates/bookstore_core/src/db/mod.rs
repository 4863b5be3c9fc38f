//! SQLite storage bootstrap and schema initialization entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the catalog.
//! - Create the `authors`/`books` tables when absent and seed them once.
//!
//! # Invariants
//! - Every connection handed out has `foreign_keys=ON`, so author deletion
//!   cascades to books.
//! - Existing tables are never recreated or re-seeded.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod schema;
pub mod seed;

pub use open::{open_db, open_db_in_memory};
pub use schema::{initialize, table_exists, InitReport, AUTHORS_TABLE, BOOKS_TABLE};
pub use seed::SeedData;

/// Default database file name used when no path is configured.
pub const DEFAULT_DATABASE_FILE: &str = "table_books.db";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
