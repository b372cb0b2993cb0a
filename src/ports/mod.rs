pub mod cache;
pub mod record_store;
