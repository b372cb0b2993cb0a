use serde::{Deserialize, Serialize};

/// Hit/miss counters read from the cache server with the derived hit ratio.
///
/// A degraded snapshot carries `error` and all-zero counters; healthy
/// snapshots omit `error` entirely when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    pub total_requests: u64,
    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub hit_ratio: f64,
}

impl CacheMetrics {
    pub fn from_counters(hits: u64, misses: u64) -> Self {
        Self {
            error: None,
            keyspace_hits: hits,
            keyspace_misses: misses,
            total_requests: hits.saturating_add(misses),
            hit_ratio: hit_ratio(hits, misses),
        }
    }

    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            keyspace_hits: 0,
            keyspace_misses: 0,
            total_requests: 0,
            hit_ratio: 0.0,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// `hits / (hits + misses) * 100`, rounded to two decimals; `0` when no lookups happened.
#[allow(clippy::cast_precision_loss)]
pub fn hit_ratio(hits: u64, misses: u64) -> f64 {
    let total = hits.saturating_add(misses);
    if total == 0 {
        return 0.0;
    }
    round_2dp(hits as f64 / total as f64 * 100.0)
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
