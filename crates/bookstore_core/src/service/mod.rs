//! Catalog use-case services.
//!
//! # Responsibility
//! - Run validation rules that need storage lookups (title uniqueness,
//!   author existence) before delegating writes to repositories.
//! - Keep transport layers decoupled from storage details.

pub mod author_service;
pub mod book_service;
