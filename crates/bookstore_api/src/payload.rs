//! Request decoding and response bodies.
//!
//! # Responsibility
//! - Turn raw JSON request bodies into `NewBook`/`NewAuthor` candidates,
//!   collecting every field problem into one `FieldErrors` map.
//! - Define the documented wire shapes for books, authors and messages.
//!
//! # Invariants
//! - A client-supplied `id` is ignored; ids come from storage only.
//! - Unknown fields are ignored.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use bookstore_core::model::validation::{MISSING_FIELD_MESSAGE, SCHEMA_FIELD};
use bookstore_core::{Author, Book, FieldErrors, NewAuthor, NewBook};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

const NULL_FIELD_MESSAGE: &str = "Field may not be null.";
const NOT_A_STRING_MESSAGE: &str = "Not a valid string.";
const NOT_AN_INTEGER_MESSAGE: &str = "Not a valid integer.";
const INVALID_INPUT_MESSAGE: &str = "Invalid input type.";

/// Book as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookBody {
    pub id: i64,
    pub title: String,
    /// Id of the owning author.
    pub author: i64,
}

impl From<Book> for BookBody {
    fn from(value: Book) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
        }
    }
}

/// Book fields accepted on create/update.
#[derive(Debug, Clone, ToSchema)]
pub struct BookInput {
    /// Must be unique across all books.
    pub title: String,
    /// Must reference an existing author.
    pub author: i64,
}

/// Author as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorBody {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<Author> for AuthorBody {
    fn from(value: Author) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

/// Author fields accepted on create.
#[derive(Debug, Clone, ToSchema)]
pub struct AuthorInput {
    pub first_name: String,
    pub last_name: String,
}

/// Validation failures keyed by field name, as in `{"title": ["..."]}`.
#[derive(Debug, Clone, ToSchema)]
pub struct FieldErrorsBody(pub BTreeMap<String, Vec<String>>);

/// Plain message body used by not-found and failure responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Decodes a book candidate from a JSON request body.
pub fn decode_book(body: Result<Json<Value>, JsonRejection>) -> Result<NewBook, FieldErrors> {
    let object = decode_object(body)?;
    let mut errors = FieldErrors::new();
    let title = read_string(&object, "title", &mut errors);
    let author = read_integer(&object, "author", &mut errors);

    match (title, author) {
        (Some(title), Some(author)) if errors.is_empty() => Ok(NewBook::new(title, author)),
        _ => Err(errors),
    }
}

/// Decodes an author candidate from a JSON request body.
pub fn decode_author(body: Result<Json<Value>, JsonRejection>) -> Result<NewAuthor, FieldErrors> {
    let object = decode_object(body)?;
    let mut errors = FieldErrors::new();
    let first_name = read_string(&object, "first_name", &mut errors);
    let last_name = read_string(&object, "last_name", &mut errors);

    match (first_name, last_name) {
        (Some(first_name), Some(last_name)) if errors.is_empty() => {
            Ok(NewAuthor::new(first_name, last_name))
        }
        _ => Err(errors),
    }
}

fn decode_object(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, FieldErrors> {
    match body {
        Ok(Json(Value::Object(object))) => Ok(object),
        Ok(Json(_)) => Err(FieldErrors::single(SCHEMA_FIELD, INVALID_INPUT_MESSAGE)),
        Err(rejection) => Err(FieldErrors::single(SCHEMA_FIELD, rejection.body_text())),
    }
}

fn read_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match object.get(field) {
        None => {
            errors.add(field, MISSING_FIELD_MESSAGE);
            None
        }
        Some(Value::Null) => {
            errors.add(field, NULL_FIELD_MESSAGE);
            None
        }
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            errors.add(field, NOT_A_STRING_MESSAGE);
            None
        }
    }
}

/// Accepts JSON integers and integer-valued strings (`"3"`).
fn read_integer(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    let parsed = match object.get(field) {
        None => {
            errors.add(field, MISSING_FIELD_MESSAGE);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, NULL_FIELD_MESSAGE);
            return None;
        }
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    if parsed.is_none() {
        errors.add(field, NOT_AN_INTEGER_MESSAGE);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::{decode_author, decode_book};
    use axum::Json;
    use serde_json::json;

    #[test]
    fn book_with_all_fields_decodes() {
        let body = json!({ "title": "Dune", "author": 2, "id": 99 });
        let book = decode_book(Ok(Json(body))).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, 2);
    }

    #[test]
    fn missing_book_fields_are_all_reported() {
        let errors = decode_book(Ok(Json(json!({})))).unwrap_err();
        assert_eq!(
            errors.get("title").unwrap(),
            ["Missing data for required field."]
        );
        assert_eq!(
            errors.get("author").unwrap(),
            ["Missing data for required field."]
        );
    }

    #[test]
    fn wrong_types_are_reported_per_field() {
        let body = json!({ "title": 12, "author": "twelve" });
        let errors = decode_book(Ok(Json(body))).unwrap_err();
        assert_eq!(errors.get("title").unwrap(), ["Not a valid string."]);
        assert_eq!(errors.get("author").unwrap(), ["Not a valid integer."]);
    }

    #[test]
    fn integer_strings_and_non_integral_numbers() {
        let body = json!({ "title": "Dune", "author": "4" });
        assert_eq!(decode_book(Ok(Json(body))).unwrap().author, 4);

        let body = json!({ "title": "Dune", "author": 1.5 });
        let errors = decode_book(Ok(Json(body))).unwrap_err();
        assert!(errors.has("author"));
    }

    #[test]
    fn non_object_body_is_a_schema_error() {
        let errors = decode_author(Ok(Json(json!(["first", "last"])))).unwrap_err();
        assert_eq!(errors.get("_schema").unwrap(), ["Invalid input type."]);
    }

    #[test]
    fn null_author_names_are_rejected() {
        let body = json!({ "first_name": null, "last_name": "Toy" });
        let errors = decode_author(Ok(Json(body))).unwrap_err();
        let first_name = errors.get("first_name").unwrap();
        assert_eq!(first_name, ["Field may not be null."]);
        assert!(!errors.has("last_name"));
    }
}
