pub(crate) mod authors;
pub(crate) mod books;
pub(crate) mod system;

use crate::error::ApiError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::Json;
use log::debug;
use serde::Serialize;
use serde_json::Value;

const RESOURCE_NOT_FOUND: &str = "Resource not found";

/// Integer `{id}` path segment.
///
/// A segment that is not an integer names no resource, so it answers
/// `404 {"message": ...}` rather than a plain-text 400.
pub(crate) struct IdPath(pub(crate) i64);

impl<S: Send + Sync> FromRequestParts<S> for IdPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                debug!(
                    "event=path_reject module=api status=error path={} error={}",
                    parts.uri.path(),
                    rejection.body_text()
                );
                Err(ApiError::NotFound(RESOURCE_NOT_FOUND))
            }
        }
    }
}

/// Serializes a found record, or `{}` when the record is absent.
fn found_or_empty<T: Serialize>(record: Option<T>) -> Result<Json<Value>, ApiError> {
    let value = match record {
        Some(record) => serde_json::to_value(record)
            .map_err(|err| ApiError::Internal(format!("response encoding failed: {err}")))?,
        None => Value::Object(serde_json::Map::new()),
    };
    Ok(Json(value))
}
