//! HTTP transport for the bookstore catalog.
//!
//! # Responsibility
//! - Map `/api/books` and `/api/authors` requests onto core services.
//! - Decode and validate request payloads before any storage access.
//! - Publish an OpenAPI document for every route.
//!
//! # Invariants
//! - Handlers never hold a connection across requests.
//! - Handlers never panic on client input.

pub mod error;
mod handlers;
pub mod payload;
mod router;
pub mod state;

pub use error::ApiError;
pub use router::{init as router, DOCS_PATH, OPENAPI_PATH};
pub use state::ApiState;
