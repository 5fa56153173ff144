use super::GridCache;
use crate::core::Result;
use crate::memory::{MemoryCollection, MemorySnapshot, compose_memory_key};
use crate::observe::{DiagnosticKind, Level};
use crate::settings::Settings;

/// Reason given when a version change wipes all memory.
pub const VERSION_UPGRADE_REASON: &str = "version upgraded, previous user memory cleared automatically";

impl GridCache {
    /// `<pathname><hash>-<grid name>` for the current page location.
    pub fn get_memory_key(&self, grid_manager_name: &str) -> String {
        compose_memory_key(&self.page.pathname(), &self.page.hash(), grid_manager_name)
    }

    /// Reads the whole collection; `None` when nothing is stored.
    fn read_collection(&self) -> Result<Option<MemoryCollection>> {
        match self.store.get_item(&self.config.memory_key)? {
            Some(raw) => MemoryCollection::parse(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn write_collection(&self, collection: &MemoryCollection) -> Result<()> {
        self.store
            .set_item(&self.config.memory_key, &collection.to_json_string()?)
    }

    /// Remembered layout of the instance at the current location.
    ///
    /// When the store holds no memory at all the grid root is tagged with
    /// the cache-error attribute. Unreadable memory is reported and treated
    /// as absent.
    pub fn get_user_memory(&self, grid_manager_name: &str) -> Option<MemorySnapshot> {
        if grid_manager_name.trim().is_empty() {
            return None;
        }

        let collection = match self.read_collection() {
            Ok(collection) => collection,
            Err(err) => {
                self.emit(
                    Level::Warn,
                    DiagnosticKind::CorruptMemory,
                    format!("{}: user memory unreadable ({})", grid_manager_name, err),
                );
                return None;
            }
        };

        let Some(collection) = collection.filter(|c| !c.is_empty()) else {
            self.page.set_root_attribute(
                grid_manager_name,
                &self.config.cache_error_attribute,
                "error",
            );
            return None;
        };

        let raw = collection.get(&self.get_memory_key(grid_manager_name))?;
        match MemorySnapshot::parse(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                self.emit(
                    Level::Warn,
                    DiagnosticKind::CorruptMemory,
                    format!("{}: user memory unreadable ({})", grid_manager_name, err),
                );
                None
            }
        }
    }

    /// Stores the layout of `settings` under its memory key.
    ///
    /// Returns `Ok(false)` without touching the store when caching is
    /// disabled. Entries of other instances are written back unchanged.
    pub fn save_user_memory(&self, settings: &Settings) -> Result<bool> {
        if settings.disable_cache {
            return Ok(false);
        }

        let snapshot = MemorySnapshot::from_settings(settings);
        let mut collection = match self.read_collection() {
            Ok(collection) => collection.unwrap_or_default(),
            Err(err) => {
                self.emit(
                    Level::Warn,
                    DiagnosticKind::CorruptMemory,
                    format!("user memory unreadable, starting over ({})", err),
                );
                MemoryCollection::new()
            }
        };

        collection.insert(
            &self.get_memory_key(&settings.grid_manager_name),
            snapshot.to_json_string()?,
        );
        self.write_collection(&collection)?;
        Ok(true)
    }

    /// Deletes the memory of one instance, or of all instances when
    /// `grid_manager_name` is `None`. Returns whether anything was deleted.
    pub fn del_user_memory(&self, grid_manager_name: Option<&str>, reason: &str) -> Result<bool> {
        match grid_manager_name {
            Some(name) => self.clear_memory_of(name, DiagnosticKind::MemoryCleared, reason),
            None => self.clear_all_memory(DiagnosticKind::AllMemoryCleared, reason),
        }
    }

    /// Removes the whole collection, reporting the removal as `kind`.
    fn clear_all_memory(&self, kind: DiagnosticKind, reason: &str) -> Result<bool> {
        if self.store.get_item(&self.config.memory_key)?.is_none() {
            self.emit(Level::Warn, DiagnosticKind::NoMemory, "no user memory");
            return Ok(false);
        }
        self.store.remove_item(&self.config.memory_key)?;
        self.emit(Level::Warn, kind, format!("all user memory cleared: {}", reason));
        Ok(true)
    }

    /// Removes the entry of `name`, reporting the removal as `kind`.
    pub(crate) fn clear_memory_of(&self, name: &str, kind: DiagnosticKind, reason: &str) -> Result<bool> {
        let memory_key = self.get_memory_key(name);
        let mut collection = match self.read_collection() {
            Ok(collection) => collection,
            Err(err) => {
                self.emit(
                    Level::Warn,
                    DiagnosticKind::CorruptMemory,
                    format!("{}: user memory unreadable ({})", name, err),
                );
                None
            }
        };

        let removed = collection
            .as_mut()
            .is_some_and(|collection| collection.remove(&memory_key));
        let Some(collection) = collection.filter(|_| removed) else {
            self.emit(
                Level::Warn,
                DiagnosticKind::NoMemory,
                format!("{}: no user memory", name),
            );
            return Ok(false);
        };

        self.write_collection(&collection)?;
        self.emit(
            Level::Warn,
            kind,
            format!("{} user memory cleared: {}", name, reason),
        );
        Ok(true)
    }

    /// Wipes all user memory when it was written by another version.
    ///
    /// Returns `true` when the stored version marker changed.
    pub fn verify_version(&self) -> Result<bool> {
        let stored = self.store.get_item(&self.config.version_key)?;
        if stored.as_deref() == Some(self.config.version.as_str()) {
            return Ok(false);
        }

        if self.store.get_item(&self.config.memory_key)?.is_some() {
            self.clear_all_memory(DiagnosticKind::VersionUpgrade, VERSION_UPGRADE_REASON)?;
        }
        self.store
            .set_item(&self.config.version_key, &self.config.version)?;
        Ok(true)
    }
}
