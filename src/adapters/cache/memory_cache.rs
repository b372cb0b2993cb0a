use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;

use crate::error::{PropertyCacheError, Result};
use crate::ports::cache::{CacheClient, CacheInfo};

const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(100).unwrap();

struct CacheEntry {
    value: String,
    /// `None` when `now + ttl` is past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() > at)
    }
}

/// In-process stand-in for the cache server: a bounded LRU with per-entry
/// expiry that keeps Redis-style keyspace hit/miss counters.
pub struct MemoryCache {
    inner: RwLock<LruCache<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or_else(|| {
            tracing::warn!("Cache max_entries was 0, defaulting to {DEFAULT_CAPACITY}");
            DEFAULT_CAPACITY
        });
        Self {
            inner: RwLock::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lookup(&self, key: &str) -> Result<Option<String>> {
        let mut cache = self.inner.write().map_err(|_| {
            tracing::error!("Cache lock poisoned on get('{key}')");
            PropertyCacheError::LockPoisoned { op: "get" }
        })?;
        let Some(entry) = cache.get(key) else {
            return Ok(None);
        };
        if entry.is_expired() {
            cache.pop(key);
            return Ok(None);
        }
        Ok(Some(entry.value.clone()))
    }

    fn len(&self) -> usize {
        self.inner.read().map_or(0, |cache| cache.len())
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.lookup(key)?;
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut cache = self.inner.write().map_err(|_| {
            tracing::error!("Cache lock poisoned on set('{key}')");
            PropertyCacheError::LockPoisoned { op: "set" }
        })?;
        cache.put(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: Instant::now().checked_add(ttl),
            },
        );
        Ok(())
    }

    async fn info(&self) -> Result<CacheInfo> {
        Ok([
            (
                "keyspace_hits".to_string(),
                self.hits.load(Ordering::Relaxed).to_string(),
            ),
            (
                "keyspace_misses".to_string(),
                self.misses.load(Ordering::Relaxed).to_string(),
            ),
            ("keys".to_string(), self.len().to_string()),
        ]
        .into_iter()
        .collect())
    }
}
