//! HTTP error mapping.
//!
//! # Invariants
//! - Validation failures answer 400 with the `{field: [messages]}` map.
//! - Store failure details are logged, never sent to clients.

use crate::payload::MessageBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookstore_core::{AuthorServiceError, BookServiceError, DbError, FieldErrors, RepoError};
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failure of one API request.
#[derive(Debug)]
pub enum ApiError {
    /// Rejected input, 400.
    Validation(FieldErrors),
    /// Missing resource answered with a message body, 404.
    NotFound(&'static str),
    /// Store constraint rejected the write, 409.
    Conflict(String),
    /// Store or runtime failure, 500.
    Internal(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "validation failed: {errors}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::NotFound(message) => message_response(StatusCode::NOT_FOUND, message),
            Self::Conflict(message) => {
                warn!(
                    "event=api_error module=api status=error error_code=conflict error={message}"
                );
                message_response(StatusCode::CONFLICT, message)
            }
            Self::Internal(message) => {
                error!(
                    "event=api_error module=api status=error error_code=internal error={message}"
                );
                message_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageBody {
            message: message.into(),
        }),
    )
        .into_response()
}

impl From<FieldErrors> for ApiError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ConstraintViolation(message) => Self::Conflict(message),
            RepoError::Db(err) => Self::from(err),
        }
    }
}

impl From<BookServiceError> for ApiError {
    fn from(value: BookServiceError) -> Self {
        match value {
            BookServiceError::Validation(errors) => Self::Validation(errors),
            BookServiceError::Repo(err) => Self::from(err),
        }
    }
}

impl From<AuthorServiceError> for ApiError {
    fn from(value: AuthorServiceError) -> Self {
        match value {
            AuthorServiceError::Validation(errors) => Self::Validation(errors),
            AuthorServiceError::Repo(err) => Self::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use bookstore_core::{FieldErrors, RepoError};

    #[test]
    fn validation_maps_to_bad_request() {
        let response = ApiError::from(FieldErrors::single("title", "taken")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn constraint_violation_maps_to_conflict() {
        let error = ApiError::from(RepoError::ConstraintViolation("FOREIGN KEY".to_string()));
        assert!(matches!(error, ApiError::Conflict(_)));
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_keeps_status() {
        let response = ApiError::NotFound("Author not find").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
