//! Error message normalization
//!
//! Failures reach the UI in many shapes: native errors from our own code,
//! bare strings, and structured payloads from the planner backend or the
//! identity provider. `normalize` turns any of them into one displayable line.

use serde::Serialize;
use serde_json::Value;

use crate::consts::UNKNOWN_ERROR;

/// A failure value of unknown shape.
#[derive(Debug)]
pub(crate) enum Failure {
    /// An error type implementing `std::error::Error`
    Native(Box<dyn std::error::Error + Send + Sync>),
    /// A plain string
    Text(String),
    /// A structured payload
    Value(Value),
    /// A value that could not be represented structurally
    Opaque,
    /// Nothing was thrown at all
    Undefined,
}

impl Failure {
    pub(crate) fn native<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Failure::Native(Box::new(err))
    }

    /// Capture any serializable value. Values serde_json refuses
    /// (non-string map keys, non-finite floats in some paths) become `Opaque`.
    pub(crate) fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::String(s)) => Failure::Text(s),
            Ok(v) => Failure::Value(v),
            Err(_) => Failure::Opaque,
        }
    }

    /// Interpret raw text: JSON when it parses, otherwise the text itself.
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Failure::Undefined;
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Failure::from_serializable(&value),
            Err(_) => Failure::Text(raw.to_string()),
        }
    }
}

fn string_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.as_object()?.get(field)?.as_str()
}

fn serialize_nontrivial(value: &Value) -> Option<String> {
    let rendered = serde_json::to_string(value).ok()?;
    if rendered.is_empty() || rendered == "{}" {
        return None;
    }
    Some(rendered)
}

/// Convert any failure into a human-readable message. Never panics.
pub(crate) fn normalize(failure: &Failure) -> String {
    match failure {
        Failure::Native(err) => err.to_string(),
        Failure::Text(s) => s.clone(),
        Failure::Value(Value::String(s)) => s.clone(),
        Failure::Value(value) => string_field(value, "message")
            .or_else(|| string_field(value, "error_description"))
            .map(str::to_string)
            .or_else(|| serialize_nontrivial(value))
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        Failure::Opaque | Failure::Undefined => UNKNOWN_ERROR.to_string(),
    }
}
