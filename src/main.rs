use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use property_cache::adapters::cache::memory_cache::MemoryCache;
use property_cache::adapters::cache::redis_cache::RedisCache;
use property_cache::adapters::store::postgrest::PostgrestStore;
use property_cache::config::load_config;
use property_cache::config::types::{CacheBackend, CacheConfig, Config, Transport};
use property_cache::http::page_cache::PageCache;
use property_cache::http::router::{AppState, create_router};
use property_cache::mcp::server::PropertyCacheMcpServer;
use property_cache::ports::cache::CacheClient;
use property_cache::ports::record_store::RecordStore;
use property_cache::services::cache_metrics::CacheMetricsReporter;
use property_cache::services::listing_cache::ListingCacheAccessor;

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [
        PathBuf::from("config.yaml"),
        dirs_next().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn dirs_next() -> PathBuf {
    // Look in the directory where the binary is
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn build_cache(config: &CacheConfig) -> Result<Arc<dyn CacheClient>> {
    let cache: Arc<dyn CacheClient> = match config.backend {
        CacheBackend::Memory => {
            tracing::info!("Using in-process cache ({} entries)", config.max_entries);
            Arc::new(MemoryCache::new(config.max_entries))
        }
        CacheBackend::Redis => {
            tracing::info!("Using Redis cache at {}", config.redis_url);
            Arc::new(RedisCache::connect(&config.redis_url).await?)
        }
    };
    Ok(cache)
}

async fn serve_http(config: &Config, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

async fn serve_stdio(accessor: ListingCacheAccessor, reporter: CacheMetricsReporter) -> Result<()> {
    let server = PropertyCacheMcpServer::new(accessor, reporter);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting property-cache");

    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    // Build dependencies
    let cache = build_cache(&config.cache).await?;
    let store: Arc<dyn RecordStore> = Arc::new(PostgrestStore::new(&config.store)?);

    let accessor = ListingCacheAccessor::new(Arc::clone(&cache), store);
    let reporter = CacheMetricsReporter::new(Arc::clone(&cache));

    match config.server.transport {
        Transport::Stdio => {
            tracing::info!("Serving MCP over stdio");
            serve_stdio(accessor, reporter).await
        }
        Transport::Http => {
            let pages = PageCache::new(
                cache,
                Duration::from_secs(config.server.page_cache_ttl_secs),
            );
            let state = AppState {
                accessor,
                reporter,
                pages,
            };
            serve_http(&config, state).await
        }
    }
}
