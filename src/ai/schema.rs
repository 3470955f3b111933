//! Lenient, typed access to model-generated JSON
//!
//! The backend is asked for strict JSON but nothing guarantees it. A field
//! that is missing reads as `None`; a field of the wrong shape is logged as a
//! schema violation and also reads as `None`. Callers therefore never see raw
//! untyped JSON and never fail a whole response because of one bad field.

use serde_json::{Map, Value};
use tracing::warn;

use crate::{ExplorerError, Result};

/// Read-only view over one JSON object, tagged with its path for logging
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    path: &'a str,
    map: &'a Map<String, Value>,
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'a> Fields<'a> {
    /// Wrap `value`, failing with a schema error if it is not an object
    pub fn of(path: &'a str, value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { path, map }),
            other => Err(ExplorerError::schema(
                path,
                format!("expected object, got {}", kind(other)),
            )),
        }
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    fn violation(&self, key: &str, expected: &str, got: &Value) {
        let err = ExplorerError::schema(
            format!("{}.{}", self.path, key),
            format!("expected {expected}, got {}", kind(got)),
        );
        warn!("Ignoring malformed field: {}", err);
    }

    /// A non-blank string, trimmed
    #[must_use]
    pub fn string(&self, key: &str) -> Option<String> {
        match self.raw(key)? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            other => {
                self.violation(key, "string", other);
                None
            }
        }
    }

    #[must_use]
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.raw(key)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.violation(key, "boolean", other);
                None
            }
        }
    }

    /// A finite number
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.raw(key)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            other => {
                self.violation(key, "number", other);
                None
            }
        }
    }

    /// Every non-blank string in an array; other items are dropped
    #[must_use]
    pub fn strings(&self, key: &str) -> Vec<String> {
        let Some(value) = self.raw(key) else {
            return Vec::new();
        };
        let Value::Array(items) = value else {
            self.violation(key, "array", value);
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::String(_) => None,
                other => {
                    self.violation(key, "array of strings", other);
                    None
                }
            })
            .collect()
    }

    /// Items of an array field
    #[must_use]
    pub fn array(&self, key: &str) -> Option<&'a [Value]> {
        match self.raw(key)? {
            Value::Array(items) => Some(items.as_slice()),
            other => {
                self.violation(key, "array", other);
                None
            }
        }
    }

    /// A nested object, re-tagged with `path` for its own violations
    #[must_use]
    pub fn object(&self, key: &str, path: &'a str) -> Option<Fields<'a>> {
        let value = self.raw(key)?;
        match Fields::of(path, value) {
            Ok(fields) => Some(fields),
            Err(err) => {
                warn!("Ignoring malformed section: {}", err);
                None
            }
        }
    }
}
