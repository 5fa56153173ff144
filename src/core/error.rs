use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("columnData[{index}] has no key field defined")]
    MissingColumnKey { index: usize },

    #[error("columnData[{index}] repeats key '{key}'")]
    DuplicateColumnKey { index: usize, key: String },

    #[error("gridManagerName must be a non-empty string")]
    MissingGridManagerName,

    #[error("Invalid grid options: {0}")]
    InvalidOptions(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for CacheError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
