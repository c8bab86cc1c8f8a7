pub mod boot_source;
pub mod boot_source_selection;
pub mod selection_filters;

pub use boot_source::BootSource;
pub use boot_source_selection::{BootSourceSelection, Field, SelectionKey};
pub use selection_filters::{SelectionFilters, WILDCARD};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::handler::Record;

/// Declared semantic type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldType {
    /// JSON integer.
    Int,
    /// JSON string.
    Str,
    /// JSON array of strings.
    StrList,
}

impl FieldType {
    /// Human-readable name used in validation messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Int => "an integer",
            FieldType::Str => "a string",
            FieldType::StrList => "a list of strings",
        }
    }
}

/// What a JSON value is, for validation messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn missing(field: &'static str) -> Error {
    Error::TypeValidation {
        field,
        reason: "missing from record".into(),
    }
}

fn mismatch(field: &'static str, expected: FieldType, got: &Value) -> Error {
    Error::TypeValidation {
        field,
        reason: format!("expected {}, got {}", expected.name(), value_kind(got)),
    }
}

/// Check a JSON value against [`FieldType::Int`].
pub(crate) fn int_value(field: &'static str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| Error::TypeValidation {
            field,
            reason: format!("expected {}, got {}", FieldType::Int.name(), n),
        }),
        other => Err(mismatch(field, FieldType::Int, other)),
    }
}

/// Check a JSON value against [`FieldType::Str`].
pub(crate) fn str_value(field: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(mismatch(field, FieldType::Str, other)),
    }
}

/// Check a JSON value against [`FieldType::StrList`]. Emptiness is the
/// caller's concern; element types are checked here.
pub(crate) fn list_value(field: &'static str, value: &Value) -> Result<Vec<String>> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(mismatch(field, FieldType::StrList, other)),
    };
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => out.push(s.clone()),
            other => {
                return Err(Error::TypeValidation {
                    field,
                    reason: format!(
                        "expected {}, element {} is {}",
                        FieldType::StrList.name(),
                        index,
                        value_kind(other)
                    ),
                })
            }
        }
    }
    Ok(out)
}

/// Extract an integer field from a record.
pub(crate) fn int_field(record: &Record, field: &'static str) -> Result<i64> {
    match record.get(field) {
        None => Err(missing(field)),
        Some(value) => int_value(field, value),
    }
}

/// Extract a string field from a record.
pub(crate) fn str_field(record: &Record, field: &'static str) -> Result<String> {
    match record.get(field) {
        None => Err(missing(field)),
        Some(value) => str_value(field, value),
    }
}

/// Extract a list-of-strings field from a record.
pub(crate) fn str_list_field(record: &Record, field: &'static str) -> Result<Vec<String>> {
    match record.get(field) {
        None => Err(missing(field)),
        Some(value) => list_value(field, value),
    }
}
