pub mod listing;
pub mod metrics;
