pub mod info;
pub mod memory_cache;
pub mod redis_cache;
