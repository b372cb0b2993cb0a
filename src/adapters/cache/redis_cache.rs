use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use tracing::{debug, info};

use crate::error::{PropertyCacheError, Result};
use crate::ports::cache::{CacheClient, CacheInfo};

use super::info::parse_info;

/// Cache server adapter backed by a pooled Redis connection.
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    /// Builds the pool and verifies the server answers `PING`.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let pool = Config::from_url(redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| PropertyCacheError::Pool {
                reason: format!("failed to create Redis pool: {e}"),
            })?;
        let cache = Self { pool };

        let mut conn = cache.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        info!("Connected to Redis cache server");

        Ok(cache)
    }

    async fn connection(&self) -> Result<Connection> {
        self.pool.get().await.map_err(|e| PropertyCacheError::Pool {
            reason: format!("failed to get Redis connection: {e}"),
        })
    }
}

/// Redis `EX` rejects zero, so sub-second TTLs are rounded up to one second.
fn expiry_secs(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs.max(1)
    }
}

#[async_trait]
impl CacheClient for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        debug!(key, hit = value.is_some(), "redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        let secs = expiry_secs(ttl);
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(secs)
            .query_async(&mut conn)
            .await?;
        debug!(key, ttl_secs = secs, "redis SET");
        Ok(())
    }

    async fn info(&self) -> Result<CacheInfo> {
        let mut conn = self.connection().await?;
        let raw: String = redis::cmd("INFO").arg("stats").query_async(&mut conn).await?;
        Ok(parse_info(&raw))
    }
}
