//! Structural compatibility between stored memory and live columns

use super::snapshot::ColumnMemory;
use crate::core::ColumnMap;
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Expected shape of a stored column map: exactly these keys, each entry an
/// object whose fields are drawn from that column's allowed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySchema {
    columns: Vec<(String, Vec<String>)>,
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a column `key` whose stored entry only uses `fields`.
    pub fn column<F>(mut self, key: impl Into<String>, fields: F) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
    {
        self.columns
            .push((key.into(), fields.into_iter().map(Into::into).collect()));
        self
    }

    /// Schema of `column_map`. A column may carry any field its live entry
    /// serializes, plus the layout fields even when they are unset.
    pub fn for_columns(column_map: &ColumnMap) -> Self {
        column_map.iter().fold(Self::new(), |schema, column| {
            let mut fields: Vec<String> = match serde_json::to_value(column) {
                Ok(JsonValue::Object(entry)) => entry.keys().cloned().collect(),
                _ => Vec::new(),
            };
            for field in ColumnMemory::FIELDS {
                if !fields.iter().any(|f| f == field) {
                    fields.push(field.to_string());
                }
            }
            schema.column(column.key.as_str(), fields)
        })
    }

    fn fields_of(&self, key: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, fields)| fields.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    ColumnCount { expected: usize, found: usize },
    UnknownColumn(String),
    NotAnObject(String),
    UnexpectedField { column: String, field: String },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::ColumnCount { expected, found } => {
                write!(f, "expected {} columns, memory has {}", expected, found)
            }
            Mismatch::UnknownColumn(key) => write!(f, "memory has unknown column '{}'", key),
            Mismatch::NotAnObject(key) => write!(f, "memory entry for '{}' is not an object", key),
            Mismatch::UnexpectedField { column, field } => {
                write!(f, "memory entry for '{}' has unexpected field '{}'", column, field)
            }
        }
    }
}

/// First difference between `stored` and `schema`, or `Ok` when they agree.
///
/// Equal counts plus every stored key being known means the key sets are
/// equal, since the stored map cannot hold duplicates.
pub fn check_compatibility(
    schema: &MemorySchema,
    stored: &Map<String, JsonValue>,
) -> Result<(), Mismatch> {
    if stored.len() != schema.columns.len() {
        return Err(Mismatch::ColumnCount {
            expected: schema.columns.len(),
            found: stored.len(),
        });
    }

    for (key, entry) in stored {
        let Some(allowed) = schema.fields_of(key) else {
            return Err(Mismatch::UnknownColumn(key.clone()));
        };
        let fields = entry
            .as_object()
            .ok_or_else(|| Mismatch::NotAnObject(key.clone()))?;
        if let Some(field) = fields
            .keys()
            .find(|field| !allowed.iter().any(|f| f == *field))
        {
            return Err(Mismatch::UnexpectedField {
                column: key.clone(),
                field: field.clone(),
            });
        }
    }

    Ok(())
}
