//! Structured error reports produced by evaluation.
//!
//! A report maps each failing path to the locations of the rules it
//! violated. Rule locations are JSON pointers into the rule document
//! (e.g. `/allOf/1/validMeta`), so the failure chain is recoverable
//! against the loaded schema.

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::JsonValidationErrors;

/// A single reported failure: the path it concerns and its payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedError {
    /// Evaluated path (possibly a rewritten or companion path).
    pub path: String,
    /// Message or nested schema-violation map.
    pub err: ErrorValue,
}

impl ReportedError {
    pub(crate) fn message(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            err: ErrorValue::Message(message.into()),
        }
    }

    pub(crate) fn schema(path: &str, errors: JsonValidationErrors) -> Self {
        Self {
            path: path.to_string(),
            err: ErrorValue::Schema(errors),
        }
    }
}

/// Payload of a reported failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorValue {
    Message(String),
    Schema(JsonValidationErrors),
}

/// Failures of one evaluated path, keyed by rule location.
pub type PathErrors = IndexMap<String, ReportedError>;

/// Report of a whole run: evaluated path -> failures, in enumeration
/// order. An empty report means the tree is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub entries: IndexMap<String, PathErrors>,
}

impl Report {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Paths with failures, in enumeration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Extend a rule location pointer by one key.
pub(crate) fn child_loc(loc: &str, key: &str) -> String {
    format!("{loc}/{key}")
}

/// Render a location for report keys; the root is `/`.
pub(crate) fn loc_key(loc: &str) -> String {
    if loc.is_empty() {
        "/".to_string()
    } else {
        loc.to_string()
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
