//! Resolved per-instance grid configuration

mod columns;
mod contribution;

pub use columns::{build_column_map, validate_column_data};
pub use contribution::{CheckboxColumn, ColumnContribution, OrderColumn};

use crate::core::{CacheError, ColumnDef, ColumnMap, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Settings of one grid instance.
///
/// Deserializing raw user options folds in the defaults below; options the
/// cache does not interpret are carried in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub grid_manager_name: String,
    pub disable_cache: bool,
    pub support_adjust: bool,
    pub support_ajax_page: bool,
    pub support_auto_order: bool,
    pub support_checkbox: bool,
    pub page_size: u64,
    pub page_size_key: String,
    pub current_page_key: String,
    pub column_data: Vec<ColumnDef>,
    #[serde(skip_deserializing)]
    pub column_map: ColumnMap,
    pub page_data: Map<String, JsonValue>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Settings {
    pub fn new(grid_manager_name: &str) -> Self {
        Self {
            grid_manager_name: grid_manager_name.to_string(),
            ..Self::default()
        }
    }

    /// Parses raw user options on top of the defaults.
    pub fn from_options(options: JsonValue) -> Result<Self> {
        if !options.is_object() {
            return Err(CacheError::InvalidOptions(
                "options must be a JSON object".to_string(),
            ));
        }
        let mut settings: Settings = serde_json::from_value(options)
            .map_err(|e| CacheError::InvalidOptions(e.to_string()))?;
        // columnMap is always derived from columnData
        settings.extra.remove("columnMap");
        if settings.grid_manager_name.trim().is_empty() {
            return Err(CacheError::MissingGridManagerName);
        }
        Ok(settings)
    }

    /// Page size currently held in `page_data`, falling back to `page_size`.
    pub fn current_page_size(&self) -> JsonValue {
        self.page_data
            .get(&self.page_size_key)
            .cloned()
            .unwrap_or_else(|| JsonValue::from(self.page_size))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_manager_name: String::new(),
            disable_cache: true,
            support_adjust: true,
            support_ajax_page: false,
            support_auto_order: true,
            support_checkbox: true,
            page_size: 20,
            page_size_key: "pSize".to_string(),
            current_page_key: "cPage".to_string(),
            column_data: Vec::new(),
            column_map: ColumnMap::new(),
            page_data: Map::new(),
            extra: Map::new(),
        }
    }
}
