use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::listing::Listing;
use crate::error::Result;
use crate::ports::cache::CacheClient;
use crate::ports::record_store::RecordStore;

/// Cache key holding the serialized listing snapshot.
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

/// How long a listing snapshot stays valid after it is written.
pub const DEFAULT_LISTINGS_TTL: Duration = Duration::from_secs(3600);

/// Read-through cache over the full listing collection.
///
/// Writes to the record store do not evict the snapshot; a stale copy is
/// served until its TTL runs out. Concurrent misses are not coalesced, so
/// each may query the store and rewrite the same key.
#[derive(Clone)]
pub struct ListingCacheAccessor {
    cache: Arc<dyn CacheClient>,
    store: Arc<dyn RecordStore>,
    ttl: Duration,
}

impl ListingCacheAccessor {
    pub fn new(cache: Arc<dyn CacheClient>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            cache,
            store,
            ttl: DEFAULT_LISTINGS_TTL,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached snapshot if present, otherwise loads every listing
    /// from the store and caches it under [`ALL_PROPERTIES_KEY`].
    ///
    /// Cache and store failures are returned as-is. An entry that no longer
    /// decodes is treated as a miss and overwritten.
    pub async fn get_all_listings(&self) -> Result<Vec<Listing>> {
        if let Some(cached) = self.cache.get(ALL_PROPERTIES_KEY).await? {
            match serde_json::from_str::<Vec<Listing>>(&cached) {
                Ok(listings) => {
                    debug!(count = listings.len(), "Listing snapshot served from cache");
                    return Ok(listings);
                }
                Err(e) => {
                    warn!("Discarding undecodable '{ALL_PROPERTIES_KEY}' entry: {e}");
                }
            }
        }

        let listings = self.store.fetch_all_listings().await?;
        let payload = serde_json::to_string(&listings)?;
        self.cache.set(ALL_PROPERTIES_KEY, &payload, self.ttl).await?;
        debug!(
            count = listings.len(),
            ttl_secs = self.ttl.as_secs(),
            "Listing snapshot loaded from store and cached"
        );
        Ok(listings)
    }
}
