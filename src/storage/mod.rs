pub mod engine;
pub mod memory;
pub mod persistence;
pub mod registry;

pub use engine::MemoryStore;
pub use memory::InMemoryStore;
pub use persistence::FileStore;
pub use registry::{InstanceState, Registry};
