pub mod page_cache;
pub mod router;
