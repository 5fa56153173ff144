//! File-backed persistence for user memory

use super::MemoryStore;
use crate::core::{CacheError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;

// ============================================================================
// File Store
// ============================================================================

/// Keeps every item in one JSON object file.
///
/// The file is loaded once on open; each mutation rewrites it through a
/// temp file in the same directory followed by a rename, so a crash never
/// leaves a half-written collection behind.
pub struct FileStore {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = if path.exists() {
            let data = fs::read(&path).map_err(|e| {
                CacheError::Storage(format!("Failed to read store '{}': {}", path.display(), e))
            })?;
            if data.is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_slice(&data).map_err(|e| {
                    CacheError::Serialization(format!(
                        "Failed to parse store '{}': {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Item keys in sorted order
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.read()?.keys().cloned().collect())
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| {
            CacheError::Storage(format!("Failed to create store directory: {}", e))
        })?;

        let serialized = serde_json::to_vec_pretty(items)?;
        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|e| CacheError::Storage(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(&serialized)
            .map_err(|e| CacheError::Storage(format!("Failed to write store: {}", e)))?;
        temp.flush()
            .map_err(|e| CacheError::Storage(format!("Failed to flush store: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| CacheError::Storage(format!("Failed to sync store: {}", e)))?;
        temp.persist(&self.path)
            .map_err(|e| CacheError::Storage(format!("Failed to rename store: {}", e)))?;
        Ok(())
    }
}

impl MemoryStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write()?;
        items.insert(key.to_string(), value.to_string());
        self.flush(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write()?;
        if items.remove(key).is_some() {
            self.flush(&items)?;
        }
        Ok(())
    }
}
