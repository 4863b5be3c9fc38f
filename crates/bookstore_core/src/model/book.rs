//! Book domain model.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never changes afterwards.
//! - `author` must reference an existing author at write time.
//! - `title` is unique across all books; uniqueness is checked by the
//!   service layer, not by a database constraint.

use super::author::AuthorId;
use super::validation::{require_non_blank, FieldErrors};
use serde::{Deserialize, Serialize};

/// Storage-assigned book identifier.
pub type BookId = i64;

/// Persisted book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Id of the owning author.
    pub author: AuthorId,
}

/// Book candidate before storage assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: AuthorId,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: AuthorId) -> Self {
        Self {
            title: title.into(),
            author,
        }
    }

    /// Runs field-level checks that need no storage access.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_non_blank(&mut errors, "title", &self.title);
        errors.into_result()
    }

    /// Attaches an id, either storage-assigned or taken from an update path.
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
        }
    }
}
