//! `/api/authors` handlers.

use super::IdPath;
use crate::error::ApiError;
use crate::payload::{
    decode_author, AuthorBody, AuthorInput, BookBody, FieldErrorsBody, MessageBody,
};
use crate::state::ApiState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::info;
use serde_json::Value;

const AUTHOR_NOT_FOUND: &str = "Author not find";

#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "authors",
    responses((status = OK, description = "All authors ordered by id", body = [AuthorBody]))
)]
pub(crate) async fn list_authors(
    State(state): State<ApiState>,
) -> Result<Json<Vec<AuthorBody>>, ApiError> {
    let authors = state
        .with_authors(|service| Ok(service.list_authors()?))
        .await?;
    Ok(Json(authors.into_iter().map(AuthorBody::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/authors",
    tag = "authors",
    request_body = AuthorInput,
    responses(
        (status = CREATED, description = "Author added", body = AuthorBody),
        (status = BAD_REQUEST, description = "Invalid author data", body = FieldErrorsBody)
    )
)]
pub(crate) async fn create_author(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthorBody>), ApiError> {
    let candidate = decode_author(body)?;
    let author = state
        .with_authors(move |service| Ok(service.create_author(candidate)?))
        .await?;

    info!("event=author_create module=api status=ok author_id={}", author.id);
    Ok((StatusCode::CREATED, Json(author.into())))
}

#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses((status = OK, description = "Books written by the author", body = [BookBody]))
)]
pub(crate) async fn list_author_books(
    State(state): State<ApiState>,
    IdPath(id): IdPath,
) -> Result<Json<Vec<BookBody>>, ApiError> {
    let books = state
        .with_books(move |service| Ok(service.list_books_by_author(id)?))
        .await?;
    Ok(Json(books.into_iter().map(BookBody::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = OK, description = "Author and their books deleted", body = AuthorBody),
        (status = NOT_FOUND, description = "No author with this id", body = MessageBody)
    )
)]
pub(crate) async fn delete_author(
    State(state): State<ApiState>,
    IdPath(id): IdPath,
) -> Result<Json<AuthorBody>, ApiError> {
    let author = state
        .with_authors(move |service| Ok(service.delete_author(id)?))
        .await?
        .ok_or(ApiError::NotFound(AUTHOR_NOT_FOUND))?;

    info!("event=author_delete module=api status=ok author_id={}", author.id);
    Ok(Json(author.into()))
}
