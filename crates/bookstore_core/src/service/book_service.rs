//! Book use-case service.
//!
//! # Responsibility
//! - Guard book writes with field validation, title uniqueness and author
//!   existence checks before anything reaches storage.
//! - Expose read/delete entry points for transport layers.
//!
//! # Invariants
//! - No two books share a title after a successful create/update.
//! - A book may keep its own title on update.
//! - The referenced author is checked before insert/update; the foreign key
//!   stays as a backstop for races.

use crate::model::author::AuthorId;
use crate::model::book::{Book, BookId, NewBook};
use crate::model::validation::FieldErrors;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::book_repo::BookRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for book write use-cases.
#[derive(Debug)]
pub enum BookServiceError {
    /// Input rejected before persistence.
    Validation(FieldErrors),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for BookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid book: {errors}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for BookServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<FieldErrors> for BookServiceError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// Book service facade over book and author repositories.
pub struct BookService<B: BookRepository, A: AuthorRepository> {
    books: B,
    authors: A,
}

impl<B: BookRepository, A: AuthorRepository> BookService<B, A> {
    /// Creates a service; `authors` is used for reference checks only.
    pub fn new(books: B, authors: A) -> Self {
        Self { books, authors }
    }

    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.books.list_books()
    }

    pub fn list_books_by_author(&self, author: AuthorId) -> RepoResult<Vec<Book>> {
        self.books.list_books_by_author(author)
    }

    pub fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.books.get_book(id)
    }

    pub fn get_book_by_title(&self, title: &str) -> RepoResult<Option<Book>> {
        self.books.get_book_by_title(title)
    }

    /// Validates and inserts a new book.
    ///
    /// # Errors
    /// - `Validation` for a blank title, a taken title or a missing author.
    /// - `Repo` for store failures.
    pub fn create_book(&self, candidate: NewBook) -> Result<Book, BookServiceError> {
        self.validate(&candidate, None)?;
        Ok(self.books.create_book(&candidate)?)
    }

    /// Validates and rewrites the book with `id`, keeping the id.
    ///
    /// Returns `Ok(None)` when no book has `id`.
    pub fn update_book(
        &self,
        id: BookId,
        candidate: NewBook,
    ) -> Result<Option<Book>, BookServiceError> {
        self.validate(&candidate, Some(id))?;
        Ok(self.books.update_book(&candidate.with_id(id))?)
    }

    pub fn delete_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.books.delete_book(id)
    }

    fn validate(
        &self,
        candidate: &NewBook,
        updating: Option<BookId>,
    ) -> Result<(), BookServiceError> {
        let mut errors = candidate.validate().err().unwrap_or_default();

        if !errors.has("title") {
            if let Some(existing) = self.books.get_book_by_title(&candidate.title)? {
                if Some(existing.id) != updating {
                    errors.add("title", duplicate_title_message(&candidate.title));
                }
            }
        }

        if self.authors.get_author(candidate.author)?.is_none() {
            errors.add("author", missing_author_message(candidate.author));
        }

        Ok(errors.into_result()?)
    }
}

fn duplicate_title_message(title: &str) -> String {
    format!("Book with title \"{title}\" already exists, please use a different title.")
}

fn missing_author_message(author: AuthorId) -> String {
    format!("Author with id {author} does not exist.")
}

#[cfg(test)]
mod tests {
    use super::{duplicate_title_message, missing_author_message};

    #[test]
    fn duplicate_title_message_quotes_title() {
        assert_eq!(
            duplicate_title_message("War and Peace"),
            "Book with title \"War and Peace\" already exists, please use a different title."
        );
    }

    #[test]
    fn missing_author_message_names_id() {
        assert!(missing_author_message(42).contains("42"));
    }
}
