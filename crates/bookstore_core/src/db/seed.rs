//! Seed rows inserted when catalog tables are created for the first time.
//!
//! Seed data is plain configuration handed to `db::initialize`; nothing here
//! is process-wide state.

use crate::model::author::NewAuthor;
use crate::model::book::NewBook;
use serde::Deserialize;

/// Initial catalog content.
///
/// Book seeds reference authors by the ids storage assigns to author seeds,
/// which on a fresh table are `1..=authors.len()` in list order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub authors: Vec<NewAuthor>,
    pub books: Vec<NewBook>,
}

impl SeedData {
    /// Seed set with no rows; tables are still created.
    pub fn empty() -> Self {
        Self {
            authors: Vec::new(),
            books: Vec::new(),
        }
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            authors: vec![
                NewAuthor::new("Swaroop", "Chip"),
                NewAuthor::new("Herman", "Melville"),
                NewAuthor::new("Leo", "Tolstoy"),
                NewAuthor::new("First", "Toy"),
            ],
            books: vec![
                NewBook::new("A Byte of Python", 1),
                NewBook::new("Moby-Dick; or, The Whale", 2),
                NewBook::new("War and Peace", 3),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SeedData;

    #[test]
    fn default_books_reference_default_authors() {
        let seed = SeedData::default();
        let author_count = i64::try_from(seed.authors.len()).unwrap();
        assert!(seed
            .books
            .iter()
            .all(|book| (1..=author_count).contains(&book.author)));
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_lists() {
        let seed: SeedData = serde_json::from_value(serde_json::json!({
            "books": []
        }))
        .unwrap();
        assert!(seed.books.is_empty());
        assert_eq!(seed.authors.len(), 4);
    }
}
