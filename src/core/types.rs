use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// One table row as handed to the grid: field name -> value, insertion ordered.
pub type Record = Map<String, JsonValue>;

/// Free-form per-instance scratch storage.
pub type Scope = Map<String, JsonValue>;

/// Canonical form of a key-field value.
///
/// `90` and `"90"` are distinct keys, matching strict equality on the
/// incoming JSON values. Records without the field have no identity.
pub fn identity_of(record: &Record, key_field: &str) -> Option<String> {
    record.get(key_field).map(|value| match value {
        JsonValue::String(s) => format!("s:{}", s),
        other => format!("v:{}", other),
    })
}

/// Position index over a list of records, keyed by the key-field value.
///
/// When several records share a key, the first one wins, so merges land on
/// the same row a front-to-back scan would pick.
pub struct IdentityIndex {
    positions: HashMap<String, usize>,
}

impl IdentityIndex {
    pub fn build(records: &[Record], key_field: &str) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if let Some(identity) = identity_of(record, key_field) {
                positions.entry(identity).or_insert(pos);
            }
        }
        Self { positions }
    }

    pub fn position_of(&self, record: &Record, key_field: &str) -> Option<usize> {
        identity_of(record, key_field).and_then(|identity| self.positions.get(&identity).copied())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Shallow merge: every field of `incoming` overwrites the one in `target`,
/// fields absent from `incoming` are kept.
pub fn merge_into(target: &mut Record, incoming: &Record) {
    for (field, value) in incoming {
        target.insert(field.clone(), value.clone());
    }
}
