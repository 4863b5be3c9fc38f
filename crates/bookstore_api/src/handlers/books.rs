//! `/api/books` handlers.
//!
//! Absent books read or deleted by id answer `200 {}`; updating an absent
//! book answers 404.

use super::{found_or_empty, IdPath};
use crate::error::ApiError;
use crate::payload::{decode_book, BookBody, BookInput, FieldErrorsBody, MessageBody};
use crate::state::ApiState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::info;
use serde_json::Value;

const BOOK_NOT_FOUND: &str = "Book not found";

#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses((status = OK, description = "All books ordered by id", body = [BookBody]))
)]
pub(crate) async fn list_books(
    State(state): State<ApiState>,
) -> Result<Json<Vec<BookBody>>, ApiError> {
    let books = state
        .with_books(|service| Ok(service.list_books()?))
        .await?;
    Ok(Json(books.into_iter().map(BookBody::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = BookInput,
    responses(
        (status = CREATED, description = "Book added", body = BookBody),
        (status = BAD_REQUEST, description = "Invalid book data", body = FieldErrorsBody)
    )
)]
pub(crate) async fn create_book(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BookBody>), ApiError> {
    let candidate = decode_book(body)?;
    let book = state
        .with_books(move |service| Ok(service.create_book(candidate)?))
        .await?;

    info!(
        "event=book_create module=api status=ok book_id={} author_id={}",
        book.id, book.author
    );
    Ok((StatusCode::CREATED, Json(book.into())))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses((status = OK, description = "The book, or an empty object when absent", body = BookBody))
)]
pub(crate) async fn get_book(
    State(state): State<ApiState>,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    let book = state
        .with_books(move |service| Ok(service.get_book(id)?))
        .await?;
    found_or_empty(book.map(BookBody::from))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookInput,
    responses(
        (status = CREATED, description = "Book updated", body = BookBody),
        (status = BAD_REQUEST, description = "Invalid book data", body = FieldErrorsBody),
        (status = NOT_FOUND, description = "No book with this id", body = MessageBody)
    )
)]
pub(crate) async fn update_book(
    State(state): State<ApiState>,
    IdPath(id): IdPath,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BookBody>), ApiError> {
    let candidate = decode_book(body)?;
    let book = state
        .with_books(move |service| Ok(service.update_book(id, candidate)?))
        .await?
        .ok_or(ApiError::NotFound(BOOK_NOT_FOUND))?;

    info!("event=book_update module=api status=ok book_id={}", book.id);
    Ok((StatusCode::CREATED, Json(book.into())))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses((status = OK, description = "The deleted book, or an empty object when absent", body = BookBody))
)]
pub(crate) async fn delete_book(
    State(state): State<ApiState>,
    IdPath(id): IdPath,
) -> Result<Json<Value>, ApiError> {
    let deleted = state
        .with_books(move |service| Ok(service.delete_book(id)?))
        .await?;

    info!(
        "event=book_delete module=api status=ok book_id={} deleted={}",
        id,
        deleted.is_some()
    );
    found_or_empty(deleted.map(BookBody::from))
}
