//! Shared handler state and per-request units of work.
//!
//! # Invariants
//! - State holds only the database location; no connection is shared
//!   between requests.
//! - Every unit of work opens its own connection on the blocking pool and
//!   closes it when the closure returns.

use crate::error::ApiError;
use bookstore_core::db::open_db;
use bookstore_core::{AuthorService, BookService, SqliteAuthorRepository, SqliteBookRepository};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Book service bound to one request-scoped connection.
pub type ConnBookService<'conn> =
    BookService<SqliteBookRepository<'conn>, SqliteAuthorRepository<'conn>>;

/// Author service bound to one request-scoped connection.
pub type ConnAuthorService<'conn> = AuthorService<SqliteAuthorRepository<'conn>>;

#[derive(Debug, Clone)]
pub struct ApiState {
    db_path: Arc<PathBuf>,
}

impl ApiState {
    /// Creates state for an already initialized database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Runs `f` against a fresh connection on the blocking thread pool.
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        tokio::task::spawn_blocking(move || {
            let conn = open_db(db_path.as_path())?;
            f(&conn)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
    }

    pub async fn with_books<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&ConnBookService<'_>) -> Result<T, ApiError> + Send + 'static,
    {
        self.with_connection(move |conn| {
            let service = BookService::new(
                SqliteBookRepository::new(conn),
                SqliteAuthorRepository::new(conn),
            );
            f(&service)
        })
        .await
    }

    pub async fn with_authors<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&ConnAuthorService<'_>) -> Result<T, ApiError> + Send + 'static,
    {
        self.with_connection(move |conn| {
            let service = AuthorService::new(SqliteAuthorRepository::new(conn));
            f(&service)
        })
        .await
    }
}
