use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{PropertyCacheError, Result};

/// Key/value fields from the cache server's status report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheInfo {
    fields: HashMap<String, String>,
}

impl CacheInfo {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Reads a non-negative integer counter such as `keyspace_hits`.
    pub fn counter(&self, name: &str) -> Result<u64> {
        let raw = self
            .get(name)
            .ok_or_else(|| PropertyCacheError::MissingCounter { name: name.into() })?;
        raw.trim()
            .parse::<u64>()
            .map_err(|_| PropertyCacheError::InvalidCounter {
                name: name.into(),
                raw: raw.into(),
            })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for CacheInfo {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The cache server seen from this crate: keyed string values with a TTL,
/// plus the server's status report.
///
/// `get` returns `Ok(None)` only when the key is absent or expired. A stored
/// empty value (e.g. `"[]"`) is a hit.
#[async_trait]
pub trait CacheClient: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
    async fn info(&self) -> Result<CacheInfo>;
}
