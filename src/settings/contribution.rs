use super::Settings;
use crate::core::{CHECKBOX_KEY, Column, ColumnRole, ORDER_KEY};

/// A module that inserts its own column into every grid that enables it.
pub trait ColumnContribution: Send + Sync {
    fn is_enabled(&self, settings: &Settings) -> bool;

    fn column(&self, settings: &Settings) -> Column;
}

/// Selection column. Its key is the record field holding the checked flag.
#[derive(Debug, Clone)]
pub struct CheckboxColumn {
    pub key: String,
    pub width: String,
}

impl Default for CheckboxColumn {
    fn default() -> Self {
        Self {
            key: CHECKBOX_KEY.to_string(),
            width: "40px".to_string(),
        }
    }
}

impl ColumnContribution for CheckboxColumn {
    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.support_checkbox
    }

    fn column(&self, _settings: &Settings) -> Column {
        Column::auto(&self.key, ColumnRole::Checkbox, "", &self.width)
    }
}

/// Row number column.
#[derive(Debug, Clone)]
pub struct OrderColumn {
    pub key: String,
    pub width: String,
    pub text: String,
}

impl Default for OrderColumn {
    fn default() -> Self {
        Self {
            key: ORDER_KEY.to_string(),
            width: "50px".to_string(),
            text: "No.".to_string(),
        }
    }
}

impl ColumnContribution for OrderColumn {
    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.support_auto_order
    }

    fn column(&self, _settings: &Settings) -> Column {
        Column::auto(&self.key, ColumnRole::Order, &self.text, &self.width)
    }
}
