use crate::core::Result;

/// Durable string key-value backend for user memory - allows pluggable storage backends
///
/// Semantics follow browser `localStorage`: values are opaque strings,
/// a missing item reads as `None`, removing a missing item is not an error.
pub trait MemoryStore: Send + Sync {
    /// Read one item
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Create or replace one item
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete one item
    fn remove_item(&self, key: &str) -> Result<()>;
}
