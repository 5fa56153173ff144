use crate::core::{CacheError, Result};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// `<pathname><hash>-<grid name>`
pub fn compose_memory_key(pathname: &str, hash: &str, grid_manager_name: &str) -> String {
    format!("{}{}-{}", pathname, hash, grid_manager_name)
}

/// What is remembered about one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMemory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_show: Option<bool>,
}

impl ColumnMemory {
    /// Every field a stored column entry may carry.
    pub const FIELDS: &'static [&'static str] = &["width", "index", "isShow"];
}

/// Remembered layout of one grid instance: `{ column, page }`.
///
/// Columns stay as raw JSON objects so that the compatibility check can see
/// exactly what was stored, including fields this version never writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(default)]
    pub column: Map<String, JsonValue>,
    #[serde(default)]
    pub page: Map<String, JsonValue>,
}

impl MemorySnapshot {
    /// Width, order and visibility of every column plus the page size.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut column = Map::new();
        for col in settings.column_map.iter() {
            let mut entry = Map::new();
            if let Some(width) = &col.width {
                entry.insert("width".to_string(), JsonValue::from(width.clone()));
            }
            entry.insert("index".to_string(), JsonValue::from(col.index));
            entry.insert("isShow".to_string(), JsonValue::from(col.is_show));
            column.insert(col.key.clone(), JsonValue::Object(entry));
        }

        let mut page = Map::new();
        page.insert(settings.page_size_key.clone(), settings.current_page_size());

        Self { column, page }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn column_memory(&self, key: &str) -> Option<ColumnMemory> {
        self.column
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn page_size(&self, page_size_key: &str) -> Option<&JsonValue> {
        self.page.get(page_size_key)
    }
}

/// The persisted collection: memory key -> snapshot encoded as a JSON string.
///
/// Entries other than the one being written are carried as the exact strings
/// that were read, so rewriting the collection never re-encodes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCollection {
    entries: Map<String, JsonValue>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match serde_json::from_str::<JsonValue>(raw)? {
            JsonValue::Object(entries) => Ok(Self { entries }),
            other => Err(CacheError::Serialization(format!(
                "memory collection must be a JSON object, found {}",
                other
            ))),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Raw encoded snapshot stored under `memory_key`.
    pub fn get(&self, memory_key: &str) -> Option<&str> {
        self.entries.get(memory_key).and_then(JsonValue::as_str)
    }

    pub fn insert(&mut self, memory_key: &str, encoded_snapshot: String) {
        self.entries
            .insert(memory_key.to_string(), JsonValue::String(encoded_snapshot));
    }

    pub fn remove(&mut self, memory_key: &str) -> bool {
        self.entries.remove(memory_key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
