/// Cache configuration
///
/// Names of the storage items and element attributes the cache uses,
/// plus the diagnostic label and version marker.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Storage item holding the whole user memory collection
    pub memory_key: String,

    /// Storage item holding the version that wrote the memory
    pub version_key: String,

    /// Root element attribute set when a memory lookup finds nothing stored
    pub cache_error_attribute: String,

    /// Row element attribute carrying the row's position in the table data
    pub row_key_attribute: String,

    /// Prefix label of console diagnostics
    pub label: String,

    /// Version compared against the stored marker by `verify_version`
    pub version: String,
}

impl CacheConfig {
    pub const DEFAULT_MEMORY_KEY: &'static str = "GridManagerMemory";
    pub const DEFAULT_VERSION_KEY: &'static str = "GridManagerVersion";
    pub const DEFAULT_CACHE_ERROR_ATTRIBUTE: &'static str = "grid-manager-cache-error";
    pub const DEFAULT_ROW_KEY_ATTRIBUTE: &'static str = "cache-key";
    pub const DEFAULT_LABEL: &'static str = "GridManager";

    /// Create a configuration with the default keys and the crate version
    pub fn new() -> Self {
        Self {
            memory_key: Self::DEFAULT_MEMORY_KEY.to_string(),
            version_key: Self::DEFAULT_VERSION_KEY.to_string(),
            cache_error_attribute: Self::DEFAULT_CACHE_ERROR_ATTRIBUTE.to_string(),
            row_key_attribute: Self::DEFAULT_ROW_KEY_ATTRIBUTE.to_string(),
            label: Self::DEFAULT_LABEL.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Set the memory collection item name
    pub fn memory_key(mut self, key: &str) -> Self {
        self.memory_key = key.to_string();
        self
    }

    /// Set the version marker item name
    pub fn version_key(mut self, key: &str) -> Self {
        self.version_key = key.to_string();
        self
    }

    pub fn cache_error_attribute(mut self, name: &str) -> Self {
        self.cache_error_attribute = name.to_string();
        self
    }

    pub fn row_key_attribute(mut self, name: &str) -> Self {
        self.row_key_attribute = name.to_string();
        self
    }

    /// Set the diagnostic label
    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Override the version (tests, embedders shipping their own releases)
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
