use crate::core::{Record, Scope};
use crate::settings::Settings;
use std::collections::HashMap;

/// Everything the cache keeps for one grid instance.
#[derive(Debug, Clone, Default)]
pub struct InstanceState {
    /// Absent until the first `set_scope`.
    pub scope: Option<Scope>,
    /// Response data currently rendered, in row order.
    pub data: Vec<Record>,
    /// Selected records, in selection order.
    pub checked: Vec<Record>,
    pub settings: Option<Settings>,
}

/// Instance id -> state. States are created on first write and dropped on teardown.
#[derive(Debug, Default)]
pub struct Registry {
    instances: HashMap<String, InstanceState>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&InstanceState> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut InstanceState> {
        self.instances.get_mut(id)
    }

    /// State for `id`, created empty if this is the first write.
    pub fn entry(&mut self, id: &str) -> &mut InstanceState {
        self.instances.entry(id.to_string()).or_default()
    }

    pub fn remove(&mut self, id: &str) -> Option<InstanceState> {
        self.instances.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
