//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define row-level data access contracts for authors and books.
//! - Isolate SQLite query details from service/validation orchestration.
//!
//! # Invariants
//! - Absence of a row is `Ok(None)`, never an error.
//! - Constraint failures raised by SQLite are reported as
//!   `RepoError::ConstraintViolation`, all other store failures as
//!   `RepoError::Db`.

use crate::db::DbError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod book_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level failure for catalog persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// SQLite rejected the write (foreign key, NOT NULL, ...).
    ConstraintViolation(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::ConstraintViolation(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(
                    message.clone().unwrap_or_else(|| failure.to_string()),
                )
            }
            _ => Self::Db(DbError::Sqlite(value)),
        }
    }
}
