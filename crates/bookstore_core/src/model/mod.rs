//! Catalog domain model.
//!
//! # Responsibility
//! - Define the typed records stored in the `authors` and `books` tables.
//! - Provide storage-free field validation for write candidates.
//!
//! # Invariants
//! - Persisted records always carry a storage-assigned id.
//! - Write candidates (`New*`) never carry an id.

pub mod author;
pub mod book;
pub mod validation;
