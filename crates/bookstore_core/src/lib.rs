//! Core domain logic for the bookstore catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{initialize, open_db, open_db_in_memory, DbError, DbResult, InitReport, SeedData};
pub use logging::{
    default_log_level, init_logging, logging_status, LogTarget, LoggingError, LoggingStatus,
};
pub use model::author::{Author, AuthorId, NewAuthor};
pub use model::book::{Book, BookId, NewBook};
pub use model::validation::FieldErrors;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::{AuthorService, AuthorServiceError};
pub use service::book_service::{BookService, BookServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
