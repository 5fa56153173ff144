use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Field used as the checked flag when no checkbox column is configured.
pub const CHECKBOX_KEY: &str = "gm_checkbox";

/// Key of the auto-generated row number column.
pub const ORDER_KEY: &str = "gm_order";

/// A column as the user wrote it in `columnData`.
///
/// `key` stays optional here so that a missing key surfaces as a
/// validation error with its index rather than an opaque parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_show: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_customize: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// The declared key, if it is present and non-blank.
    pub fn declared_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// Marks columns inserted by a collaborator rather than the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Checkbox,
    Order,
}

/// A resolved column entry of the column map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Display position.
    pub index: usize,
    pub is_show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    pub disable_customize: bool,
    pub is_auto_create: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ColumnRole>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Column {
    /// Builds a user column. `def` must already have passed key validation.
    pub fn from_def(key: &str, def: &ColumnDef) -> Self {
        Self {
            key: key.to_string(),
            text: def.text.clone().unwrap_or_default(),
            width: def.width.clone(),
            index: 0,
            is_show: def.is_show.unwrap_or(true),
            align: def.align.clone(),
            disable_customize: def.disable_customize.unwrap_or(false),
            is_auto_create: false,
            role: None,
            extra: def.extra.clone(),
        }
    }

    /// Builds a column owned by a collaborator (checkbox, order...).
    pub fn auto(key: &str, role: ColumnRole, text: &str, width: &str) -> Self {
        Self {
            key: key.to_string(),
            text: text.to_string(),
            width: Some(width.to_string()),
            index: 0,
            is_show: true,
            align: Some("center".to_string()),
            disable_customize: true,
            is_auto_create: true,
            role: Some(role),
            extra: Map::new(),
        }
    }
}

/// Ordered column key -> column configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    columns: Vec<Column>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes columns in display order and numbers their `index` from 0.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let mut map = Self { columns };
        for (position, column) in map.columns.iter_mut().enumerate() {
            column.index = position;
        }
        map
    }

    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| col.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|col| col.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Field holding the checked flag of a record.
    pub fn checkbox_key(&self) -> &str {
        self.columns
            .iter()
            .find(|col| col.role == Some(ColumnRole::Checkbox))
            .map(|col| col.key.as_str())
            .unwrap_or(CHECKBOX_KEY)
    }

    pub fn is_auto_created(&self, key: &str) -> bool {
        self.get(key).is_some_and(|col| col.is_auto_create)
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.key, column)?;
        }
        map.end()
    }
}
