//! Author use-case service.
//!
//! # Invariants
//! - Authors are created with non-blank names and never edited.
//! - Deleting an author removes their books (storage cascade).

use crate::model::author::{Author, AuthorId, NewAuthor};
use crate::model::validation::FieldErrors;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for author write use-cases.
#[derive(Debug)]
pub enum AuthorServiceError {
    Validation(FieldErrors),
    Repo(RepoError),
}

impl Display for AuthorServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid author: {errors}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthorServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for AuthorServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Author service facade over repository implementations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_authors(&self) -> RepoResult<Vec<Author>> {
        self.repo.list_authors()
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    /// Validates and inserts a new author.
    pub fn create_author(&self, candidate: NewAuthor) -> Result<Author, AuthorServiceError> {
        candidate
            .validate()
            .map_err(AuthorServiceError::Validation)?;
        Ok(self.repo.create_author(&candidate)?)
    }

    /// Deletes an author and, by cascade, all of their books.
    pub fn delete_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.delete_author(id)
    }
}
