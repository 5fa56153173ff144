use super::GridCache;
use crate::core::{CacheError, Result};
use crate::memory::{MemorySchema, MemorySnapshot, check_compatibility};
use crate::observe::{DiagnosticKind, Level};
use crate::settings::{ColumnContribution, Settings, build_column_map, validate_column_data};
use serde_json::Value as JsonValue;
use tracing::{Level as TraceLevel, event};

/// Reason given when stored memory no longer fits `columnData`.
pub const MEMORY_MISMATCH_REASON: &str = "stored memory does not match columnData";

impl GridCache {
    /// Resolves raw user options into the settings of one instance.
    ///
    /// Column definitions are validated first; a missing or repeated key is
    /// fatal and reported with its index. With caching enabled, remembered
    /// widths, order, visibility and page size are laid over the defaults
    /// when they still fit the configured columns, and deleted otherwise.
    /// The result is stored and returned.
    pub fn init_settings(
        &self,
        options: JsonValue,
        checkbox: &dyn ColumnContribution,
        order: &dyn ColumnContribution,
    ) -> Result<Settings> {
        let mut settings = Settings::from_options(options).inspect_err(|err| {
            self.emit(Level::Error, DiagnosticKind::InvalidOptions, err.to_string());
        })?;

        if let Err(err) = validate_column_data(&settings.column_data) {
            let (index, message) = match &err {
                CacheError::DuplicateColumnKey { index, key } => (
                    *index,
                    format!("columnData[{}] key '{}' is already used", index, key),
                ),
                CacheError::MissingColumnKey { index } => (
                    *index,
                    format!("columnData[{}] key field is undefined", index),
                ),
                other => (0, other.to_string()),
            };
            self.emit(Level::Error, DiagnosticKind::InvalidColumnKey { index }, message);
            return Err(err);
        }

        settings.column_map = build_column_map(&settings, checkbox, order);

        let current_page_key = settings.current_page_key.clone();
        let page_size_key = settings.page_size_key.clone();
        let page_size = settings.page_size;
        settings
            .page_data
            .entry(current_page_key)
            .or_insert_with(|| JsonValue::from(1));
        settings
            .page_data
            .entry(page_size_key)
            .or_insert_with(|| JsonValue::from(page_size));

        if !settings.disable_cache {
            self.apply_user_memory(&mut settings);
        }

        self.set_settings(settings.clone());
        event!(
            TraceLevel::DEBUG,
            grid = %settings.grid_manager_name,
            columns = settings.column_map.len(),
            "settings initialized"
        );
        Ok(settings)
    }

    fn apply_user_memory(&self, settings: &mut Settings) {
        let name = settings.grid_manager_name.clone();
        let Some(memory) = self.get_user_memory(&name) else {
            return;
        };

        let schema = MemorySchema::for_columns(&settings.column_map);
        if let Err(mismatch) = check_compatibility(&schema, &memory.column) {
            event!(TraceLevel::DEBUG, grid = %name, %mismatch, "user memory does not fit columns");
            let cleared =
                self.clear_memory_of(&name, DiagnosticKind::MemoryMismatch, MEMORY_MISMATCH_REASON);
            if let Err(err) = cleared {
                log::warn!("failed to delete stale user memory of '{}': {}", name, err);
            }
            return;
        }

        overlay_memory(settings, &memory);
        event!(TraceLevel::DEBUG, grid = %name, "user memory restored");
    }

    pub fn get_settings(&self, grid_manager_name: &str) -> Option<Settings> {
        self.read_registry()
            .get(grid_manager_name)
            .and_then(|state| state.settings.clone())
    }

    /// Stores `settings` under its own `grid_manager_name`.
    pub fn set_settings(&self, settings: Settings) {
        let name = settings.grid_manager_name.clone();
        self.write_registry().entry(&name).settings = Some(settings);
    }
}

/// Lays remembered column layout and page size over `settings`.
fn overlay_memory(settings: &mut Settings, memory: &MemorySnapshot) {
    let keys: Vec<String> = settings.column_map.keys().map(str::to_string).collect();
    for key in keys {
        let (Some(remembered), Some(column)) =
            (memory.column_memory(&key), settings.column_map.get_mut(&key))
        else {
            continue;
        };
        if let Some(width) = remembered.width {
            column.width = Some(width);
        }
        if let Some(index) = remembered.index {
            column.index = index;
        }
        if let Some(is_show) = remembered.is_show {
            column.is_show = is_show;
        }
    }

    if let Some(size) = memory.page_size(&settings.page_size_key) {
        if let Some(n) = size.as_u64() {
            settings.page_size = n;
        }
        settings
            .page_data
            .insert(settings.page_size_key.clone(), size.clone());
    }
}
