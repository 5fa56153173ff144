use crate::config::CacheConfig;
use crate::core::{IdentityIndex, Record, Scope, merge_into};
use crate::observe::{Diagnostic, DiagnosticKind, Level, LogObserver, Observer};
use crate::page::{HostPage, RowElement, RowLookup, RowTarget, StaticPage};
use crate::storage::{InMemoryStore, MemoryStore, Registry};
use lazy_static::lazy_static;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Global singleton instance of GridCache
lazy_static! {
    static ref GLOBAL_CACHE: GridCache = GridCache::new();
}

/// Runtime state and user memory of every grid instance on a page.
///
/// All per-instance state (scope, table data, checked set, settings) lives
/// in one registry keyed by the instance name. User memory goes to the
/// configured `MemoryStore`.
pub struct GridCache {
    pub(crate) registry: RwLock<Registry>,
    pub(crate) store: Arc<dyn MemoryStore>,
    pub(crate) page: Arc<dyn HostPage>,
    pub(crate) observer: Arc<dyn Observer>,
    pub(crate) config: CacheConfig,
}

impl GridCache {
    /// Get the global GridCache instance
    ///
    /// Shared by every grid of the process, the way a page shares one cache
    /// object between all of its grids. It keeps memory in process.
    pub fn global() -> &'static GridCache {
        &GLOBAL_CACHE
    }

    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            store: Arc::new(InMemoryStore::new()),
            page: Arc::new(StaticPage::new("/", "")),
            observer: Arc::new(LogObserver),
            config: CacheConfig::default(),
        }
    }

    /// Use `store` for user memory
    pub fn store(mut self, store: Arc<dyn MemoryStore>) -> Self {
        self.store = store;
        self
    }

    /// Use `page` for location lookups and root element tagging
    pub fn page(mut self, page: Arc<dyn HostPage>) -> Self {
        self.page = page;
        self
    }

    /// Send diagnostics to `observer`
    pub fn observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cache_config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn get_version(&self) -> &str {
        &self.config.version
    }

    pub(crate) fn read_registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write_registry(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn emit(&self, level: Level, kind: DiagnosticKind, message: impl Into<String>) {
        self.observer
            .emit(&Diagnostic::new(&self.config.label, level, kind, message));
    }

    // ------------------------------------------------------------------
    // Scope
    // ------------------------------------------------------------------

    pub fn get_scope(&self, grid_manager_name: &str) -> Option<Scope> {
        self.read_registry()
            .get(grid_manager_name)
            .and_then(|state| state.scope.clone())
    }

    /// Replaces the whole scope.
    pub fn set_scope(&self, grid_manager_name: &str, scope: Scope) {
        self.write_registry().entry(grid_manager_name).scope = Some(scope);
    }

    // ------------------------------------------------------------------
    // Table data
    // ------------------------------------------------------------------

    pub fn get_table_data(&self, grid_manager_name: &str) -> Vec<Record> {
        self.read_registry()
            .get(grid_manager_name)
            .map(|state| state.data.clone())
            .unwrap_or_default()
    }

    pub fn set_table_data(&self, grid_manager_name: &str, data: Vec<Record>) {
        self.write_registry().entry(grid_manager_name).data = data;
    }

    // ------------------------------------------------------------------
    // Row data
    // ------------------------------------------------------------------

    /// Records behind rendered row elements.
    ///
    /// The row attribute is the record's position in the table data, not
    /// its key field value.
    pub fn get_row_data(&self, grid_manager_name: &str, target: RowTarget<'_>) -> RowLookup {
        let registry = self.read_registry();
        let data = registry
            .get(grid_manager_name)
            .map(|state| state.data.as_slice())
            .unwrap_or(&[]);
        let attribute = self.config.row_key_attribute.as_str();

        let lookup = |element: &dyn RowElement| -> Option<Record> {
            element
                .attribute(attribute)
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .and_then(|position| data.get(position).cloned())
        };

        match target {
            RowTarget::Element(element) => RowLookup::One(lookup(element)),
            RowTarget::Collection(elements) => {
                RowLookup::Many(elements.into_iter().map(lookup).collect())
            }
            RowTarget::Other => RowLookup::Empty,
        }
    }

    /// Merges `rows` into the table data records with the same `key_field`
    /// value and returns the whole table.
    ///
    /// Rows without a match are dropped. When the instance supports
    /// checkboxes the checked set is refreshed with the same rows.
    pub fn update_row_data(&self, grid_manager_name: &str, key_field: &str, rows: &[Record]) -> Vec<Record> {
        let mut registry = self.write_registry();
        let Some(state) = registry.get_mut(grid_manager_name) else {
            return Vec::new();
        };

        let index = IdentityIndex::build(&state.data, key_field);
        for incoming in rows {
            if let Some(position) = index.position_of(incoming, key_field) {
                merge_into(&mut state.data[position], incoming);
            }
        }

        if let Some(settings) = state.settings.as_ref().filter(|s| s.support_checkbox) {
            super::selection::merge_checked(&mut state.checked, &settings.column_map, key_field, rows);
        }

        state.data.clone()
    }

    /// Drops every piece of runtime state of the instance. User memory stays.
    pub fn clear(&self, grid_manager_name: &str) -> bool {
        self.write_registry().remove(grid_manager_name).is_some()
    }
}

impl Default for GridCache {
    fn default() -> Self {
        Self::new()
    }
}
