use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::listing::Listing;
use crate::error::{PropertyCacheError, Result};
use crate::ports::cache::{CacheClient, CacheInfo};
use crate::ports::record_store::RecordStore;

type FetchFn = Box<dyn Fn() -> Result<Vec<Listing>> + Send + Sync>;
type InfoFn = Box<dyn Fn() -> Result<CacheInfo> + Send + Sync>;

/// Record store fake that counts how often it was queried.
pub struct FakeStore {
    fetch_fn: Mutex<FetchFn>,
    queries: AtomicUsize,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FakeStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            fetch_fn: Mutex::new(Box::new(move || Ok(listings.clone()))),
            queries: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_fetch(
        self,
        f: impl Fn() -> Result<Vec<Listing>> + Send + Sync + 'static,
    ) -> Self {
        *self.fetch_fn.lock().unwrap() = Box::new(f);
        self
    }

    pub fn replace(&self, listings: Vec<Listing>) {
        *self.fetch_fn.lock().unwrap() = Box::new(move || Ok(listings.clone()));
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn fetch_all_listings(&self) -> Result<Vec<Listing>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let f = self.fetch_fn.lock().unwrap();
        f()
    }
}

/// Cache fake whose `info` response is scripted; `get` always misses and
/// `set` is discarded.
pub struct ScriptedInfoCache {
    info_fn: Mutex<InfoFn>,
}

impl ScriptedInfoCache {
    pub fn counters(hits: u64, misses: u64) -> Self {
        Self::with_info(move || Ok(make_info(hits, misses)))
    }

    pub fn failing(reason: &'static str) -> Self {
        Self::with_info(move || {
            Err(PropertyCacheError::Pool {
                reason: reason.into(),
            })
        })
    }

    pub fn with_info(f: impl Fn() -> Result<CacheInfo> + Send + Sync + 'static) -> Self {
        Self {
            info_fn: Mutex::new(Box::new(f)),
        }
    }
}

#[async_trait]
impl CacheClient for ScriptedInfoCache {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn info(&self) -> Result<CacheInfo> {
        let f = self.info_fn.lock().unwrap();
        f()
    }
}

pub fn make_info(hits: u64, misses: u64) -> CacheInfo {
    [
        ("keyspace_hits".to_string(), hits.to_string()),
        ("keyspace_misses".to_string(), misses.to_string()),
    ]
    .into_iter()
    .collect()
}

pub fn make_listing(id: i64, title: &str, price: i64) -> Listing {
    Listing {
        id,
        title: title.to_string(),
        description: format!("Description of {title}"),
        price: Decimal::from(price),
        location: "Lisbon".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(id),
    }
}
