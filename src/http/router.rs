use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, error};

use crate::domain::listing::ListingsEnvelope;
use crate::domain::metrics::CacheMetrics;
use crate::error::PropertyCacheError;
use crate::services::cache_metrics::CacheMetricsReporter;
use crate::services::listing_cache::ListingCacheAccessor;

use super::page_cache::PageCache;

#[derive(Clone)]
pub struct AppState {
    pub accessor: ListingCacheAccessor,
    pub reporter: CacheMetricsReporter,
    pub pages: PageCache,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/properties/", get(property_list))
        .route("/cache/metrics", get(cache_metrics))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// `GET /properties/` — `{"data": [...]}`, served from the page cache when warm.
async fn property_list(State(state): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    let path = uri.path();
    if let Some(body) = state.pages.get(path).await? {
        return Ok(json_body(body));
    }

    let listings = state.accessor.get_all_listings().await?;
    let body = serde_json::to_string(&ListingsEnvelope::from(listings))
        .map_err(PropertyCacheError::from)?;
    state.pages.put(path, &body).await?;
    Ok(json_body(body))
}

async fn cache_metrics(State(state): State<AppState>) -> Json<CacheMetrics> {
    Json(state.reporter.get_cache_metrics().await)
}

fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub struct ApiError(PropertyCacheError);

impl From<PropertyCacheError> for ApiError {
    fn from(err: PropertyCacheError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        let (status, message) = match self.0 {
            PropertyCacheError::Store { .. } | PropertyCacheError::Http(_) => {
                (StatusCode::BAD_GATEWAY, "Record store unavailable")
            }
            PropertyCacheError::Redis(_)
            | PropertyCacheError::Pool { .. }
            | PropertyCacheError::LockPoisoned { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "Cache server unavailable")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "timestamp": chrono::Utc::now()
            })),
        )
            .into_response()
    }
}
