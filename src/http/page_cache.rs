use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::ports::cache::CacheClient;

/// Whole-response cache for HTTP routes, stored in the same cache server as
/// the listing snapshot under `page:{path}`.
#[derive(Clone)]
pub struct PageCache {
    cache: Arc<dyn CacheClient>,
    ttl: Duration,
}

impl PageCache {
    pub fn new(cache: Arc<dyn CacheClient>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub async fn get(&self, path: &str) -> Result<Option<String>> {
        self.cache.get(&page_key(path)).await
    }

    pub async fn put(&self, path: &str, body: &str) -> Result<()> {
        self.cache.set(&page_key(path), body, self.ttl).await
    }
}

fn page_key(path: &str) -> String {
    format!("page:{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::memory_cache::MemoryCache;

    #[test]
    fn key_is_prefixed_path() {
        assert_eq!(page_key("/properties/"), "page:/properties/");
    }

    #[tokio::test]
    async fn stores_body_under_page_key() {
        let cache = Arc::new(MemoryCache::new(10));
        let pages = PageCache::new(cache.clone(), Duration::from_secs(900));

        assert!(pages.get("/properties/").await.unwrap().is_none());
        pages.put("/properties/", r#"{"data":[]}"#).await.unwrap();

        assert_eq!(
            pages.get("/properties/").await.unwrap().as_deref(),
            Some(r#"{"data":[]}"#)
        );
        assert!(cache.get("page:/properties/").await.unwrap().is_some());
    }
}
