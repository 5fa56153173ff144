mod cache;
mod init;
mod selection;
mod user_memory;

pub use cache::GridCache;
pub use init::MEMORY_MISMATCH_REASON;
pub use user_memory::VERSION_UPGRADE_REASON;
