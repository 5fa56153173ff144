use super::GridCache;
use crate::core::{CHECKBOX_KEY, ColumnMap, IdentityIndex, Record, identity_of};
use serde_json::Value as JsonValue;

/// Truthiness of a checked flag as the widget sees it.
fn is_checked(flag: Option<&JsonValue>) -> bool {
    match flag {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(JsonValue::String(s)) => !s.is_empty(),
        Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) => true,
    }
}

/// Merges `updated` into the checked records sharing their key value.
///
/// Fields of auto-created columns (checkbox, order) are owned by the grid
/// and never overwritten from incoming data.
pub(crate) fn merge_checked(checked: &mut [Record], column_map: &ColumnMap, key_field: &str, updated: &[Record]) {
    let index = IdentityIndex::build(updated, key_field);
    if index.is_empty() {
        return;
    }

    for record in checked.iter_mut() {
        let Some(position) = index.position_of(record, key_field) else {
            continue;
        };
        for (field, value) in &updated[position] {
            if !column_map.is_auto_created(field) {
                record.insert(field.clone(), value.clone());
            }
        }
    }
}

impl GridCache {
    pub fn get_checked_data(&self, grid_manager_name: &str) -> Vec<Record> {
        self.read_registry()
            .get(grid_manager_name)
            .map(|state| state.checked.clone())
            .unwrap_or_default()
    }

    /// Replaces the checked set.
    ///
    /// With `is_checked_list` the records are taken as selected verbatim.
    /// Otherwise `data_list` is the candidate set and each record's checkbox
    /// field decides membership.
    pub fn set_checked_data(&self, grid_manager_name: &str, data_list: &[Record], is_checked_list: bool) {
        let mut registry = self.write_registry();
        let state = registry.entry(grid_manager_name);

        if is_checked_list {
            state.checked = data_list.to_vec();
            return;
        }

        let checked_field = state
            .settings
            .as_ref()
            .map(|settings| settings.column_map.checkbox_key().to_string())
            .unwrap_or_else(|| CHECKBOX_KEY.to_string());

        state.checked = data_list
            .iter()
            .filter(|record| is_checked(record.get(&checked_field)))
            .cloned()
            .collect();
    }

    /// Refreshes the fields of checked records from `updated`, matching on
    /// `key_field`. Membership and order of the checked set do not change.
    pub fn update_checked_data(
        &self,
        grid_manager_name: &str,
        column_map: &ColumnMap,
        key_field: &str,
        updated: &[Record],
    ) {
        let mut registry = self.write_registry();
        if let Some(state) = registry.get_mut(grid_manager_name) {
            merge_checked(&mut state.checked, column_map, key_field, updated);
        }
    }

    /// Whether a record with the same key value is currently checked.
    pub fn is_checked(&self, grid_manager_name: &str, key_field: &str, record: &Record) -> bool {
        let Some(identity) = identity_of(record, key_field) else {
            return false;
        };
        self.read_registry()
            .get(grid_manager_name)
            .is_some_and(|state| {
                state
                    .checked
                    .iter()
                    .any(|checked| identity_of(checked, key_field).as_ref() == Some(&identity))
            })
    }
}
