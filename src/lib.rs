// ============================================================================
// gridmemo Library
// ============================================================================

pub mod config;
pub mod core;
pub mod facade;
pub mod memory;
pub mod observe;
pub mod page;
pub mod settings;
pub mod storage;

// Re-export main types for convenience
pub use config::CacheConfig;
pub use core::{CacheError, Column, ColumnDef, ColumnMap, ColumnRole, Record, Result, Scope};
pub use facade::{GridCache, MEMORY_MISMATCH_REASON, VERSION_UPGRADE_REASON};
pub use memory::{MemoryCollection, MemorySnapshot};
pub use observe::{Diagnostic, DiagnosticKind, Level, LogObserver, Observer, RecordingObserver};
pub use page::{HostPage, RowElement, RowLookup, RowNode, RowTarget, StaticPage};
pub use settings::{CheckboxColumn, ColumnContribution, OrderColumn, Settings};
pub use storage::{FileStore, InMemoryStore, MemoryStore};

// ============================================================================
// Library version
// ============================================================================

/// Version of this library, also the default memory version marker.
///
/// # Examples
///
/// ```
/// assert_eq!(gridmemo::version(), env!("CARGO_PKG_VERSION"));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
