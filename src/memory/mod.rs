//! Persisted user memory: layout a user customized, restored on next load.

pub mod compat;
pub mod snapshot;

pub use compat::{MemorySchema, Mismatch, check_compatibility};
pub use snapshot::{ColumnMemory, MemoryCollection, MemorySnapshot, compose_memory_key};
