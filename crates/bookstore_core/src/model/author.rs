//! Author domain model.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never changes afterwards.
//! - `first_name` and `last_name` are non-blank for records written through
//!   the service layer.

use super::validation::{require_non_blank, FieldErrors};
use serde::{Deserialize, Serialize};

/// Storage-assigned author identifier.
pub type AuthorId = i64;

/// Persisted author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
}

/// Author candidate before storage assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

impl NewAuthor {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Runs field-level checks that need no storage access.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_non_blank(&mut errors, "first_name", &self.first_name);
        require_non_blank(&mut errors, "last_name", &self.last_name);
        errors.into_result()
    }

    /// Attaches a storage-assigned id.
    pub fn with_id(self, id: AuthorId) -> Author {
        Author {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NewAuthor;

    #[test]
    fn blank_names_are_reported_per_field() {
        let errors = NewAuthor::new(" ", "").validate().unwrap_err();
        assert!(errors.has("first_name"));
        assert!(errors.has("last_name"));
    }

    #[test]
    fn with_id_keeps_names() {
        let author = NewAuthor::new("Leo", "Tolstoy").with_id(3);
        assert_eq!(author.id, 3);
        assert_eq!(author.first_name, "Leo");
        assert_eq!(author.last_name, "Tolstoy");
    }
}
