use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::domain::listing::ListingsEnvelope;
use crate::services::cache_metrics::CacheMetricsReporter;
use crate::services::listing_cache::ListingCacheAccessor;

#[derive(Clone)]
pub struct PropertyCacheMcpServer {
    accessor: ListingCacheAccessor,
    reporter: CacheMetricsReporter,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PropertyCacheMcpServer {
    pub fn new(accessor: ListingCacheAccessor, reporter: CacheMetricsReporter) -> Self {
        Self {
            accessor,
            reporter,
            tool_router: Self::tool_router(),
        }
    }

    /// List every property listing, served from the cache when warm.
    #[tool(
        name = "properties_list",
        description = "List all real-estate property listings as JSON {\"data\": [...]}. Each listing has id, title, description, price, location and created_at. Results are cached for up to one hour, so very recent changes may not appear yet.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn properties_list(&self) -> Result<CallToolResult, McpError> {
        match self.accessor.get_all_listings().await {
            Ok(listings) => {
                let envelope = ListingsEnvelope::from(listings);
                match serde_json::to_string_pretty(&envelope) {
                    Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
                    Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                        "Failed to encode listings: {e}"
                    ))])),
                }
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to load property listings: {e}. The cache server or record store may be unreachable."
            ))])),
        }
    }

    /// Report keyspace hit/miss counters and the hit ratio of the cache server.
    #[tool(
        name = "cache_metrics",
        description = "Report cache server keyspace hits, misses, total lookups and hit ratio (percent, 2 decimals). If the cache server cannot be reached the counters are zero and an \"error\" field explains why.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn cache_metrics(&self) -> Result<CallToolResult, McpError> {
        let metrics = self.reporter.get_cache_metrics().await;
        match serde_json::to_string_pretty(&metrics) {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to encode cache metrics: {e}"
            ))])),
        }
    }
}

#[tool_handler]
impl ServerHandler for PropertyCacheMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Property listing cache.\n\
                 \n\
                 - properties_list: every listing (id, title, description, price, location, created_at) \
                 as {\"data\": [...]}. Served from a one-hour cache snapshot.\n\
                 - cache_metrics: cache server keyspace hits, misses and hit ratio."
                    .into(),
            ),
        }
    }
}
