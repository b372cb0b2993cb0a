use std::sync::Arc;

use tracing::{error, info};

use crate::domain::metrics::CacheMetrics;
use crate::error::{PropertyCacheError, Result};
use crate::ports::cache::CacheClient;

const HITS_FIELD: &str = "keyspace_hits";
const MISSES_FIELD: &str = "keyspace_misses";

/// Reads keyspace hit/miss counters from the cache server and derives the hit ratio.
#[derive(Clone)]
pub struct CacheMetricsReporter {
    cache: Arc<dyn CacheClient>,
}

impl CacheMetricsReporter {
    pub fn new(cache: Arc<dyn CacheClient>) -> Self {
        Self { cache }
    }

    /// Never fails: an unreachable server or a malformed report yields a
    /// zeroed snapshot carrying the error message.
    pub async fn get_cache_metrics(&self) -> CacheMetrics {
        match self.read_counters().await {
            Ok((hits, misses)) => {
                let metrics = CacheMetrics::from_counters(hits, misses);
                info!(
                    keyspace_hits = metrics.keyspace_hits,
                    keyspace_misses = metrics.keyspace_misses,
                    total_requests = metrics.total_requests,
                    hit_ratio = metrics.hit_ratio,
                    "Cache metrics"
                );
                metrics
            }
            Err(e) => {
                error!("Error retrieving cache metrics: {e}");
                CacheMetrics::unavailable(e.to_string())
            }
        }
    }

    async fn read_counters(&self) -> Result<(u64, u64)> {
        let report = self.cache.info().await.map_err(unavailable)?;
        let hits = report.counter(HITS_FIELD).map_err(unavailable)?;
        let misses = report.counter(MISSES_FIELD).map_err(unavailable)?;
        Ok((hits, misses))
    }
}

fn unavailable(cause: PropertyCacheError) -> PropertyCacheError {
    PropertyCacheError::MetricsUnavailable(Box::new(cause))
}
