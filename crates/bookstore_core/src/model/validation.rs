//! Field-level validation error map.
//!
//! # Responsibility
//! - Collect per-field validation messages before any write reaches storage.
//! - Serialize as a plain `{field: [messages]}` object for transport layers.
//!
//! # Invariants
//! - A field key is present only when it carries at least one message.
//! - Field order is deterministic (sorted by name).

use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message used when a required input field is absent.
pub const MISSING_FIELD_MESSAGE: &str = "Missing data for required field.";

/// Key used for errors that concern the payload as a whole.
pub const SCHEMA_FIELD: &str = "_schema";

/// Validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error map holding a single message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Appends one message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns whether `field` already has at least one message.
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(field, messages)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Converts into `Err(self)` when any message was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Rejects values that are empty after trimming.
pub(crate) fn require_non_blank(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "Field may not be blank.");
    }
}

#[cfg(test)]
mod tests {
    use super::FieldErrors;

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("title", "first");
        errors.add("title", "second");
        errors.add("author", "missing");

        assert_eq!(
            errors.get("title"),
            Some(["first".to_string(), "second".to_string()].as_slice())
        );
        assert!(errors.has("author"));
        assert!(!errors.has("id"));
    }

    #[test]
    fn serializes_as_flat_object() {
        let errors = FieldErrors::single("title", "taken");
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value, serde_json::json!({ "title": ["taken"] }));
    }

    #[test]
    fn empty_map_converts_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("x", "y").into_result().is_err());
    }
}
