use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// MCP JSON-RPC over stdin/stdout.
    #[default]
    Stdio,
    /// Plain HTTP routes (`/properties/`, `/cache/metrics`).
    Http,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: Transport,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_page_cache_ttl")]
    pub page_cache_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            bind_addr: default_bind_addr(),
            page_cache_ttl_secs: default_page_cache_ttl(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Capacity of the in-process backend; ignored for Redis.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: default_redis_url(),
            max_entries: default_max_entries(),
        }
    }
}

/// PostgREST endpoint exposing the listings table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_url")]
    pub base_url: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_url(),
            table: default_table(),
            api_key: None,
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".into()
}

fn default_page_cache_ttl() -> u64 {
    900 // 15 minutes
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".into()
}

fn default_max_entries() -> usize {
    500
}

fn default_store_url() -> String {
    "http://127.0.0.1:3000".into()
}

fn default_table() -> String {
    "properties".into()
}

fn default_timeout() -> u64 {
    30
}
