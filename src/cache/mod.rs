pub mod disk_cache;
pub mod error;
pub mod memory_cache;
