pub mod cache_metrics;
pub mod listing_cache;
