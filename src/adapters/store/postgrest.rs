use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, error};
use url::Url;

use crate::config::types::StoreConfig;
use crate::domain::listing::{LISTING_FIELDS, Listing};
use crate::error::{PropertyCacheError, Result};
use crate::ports::record_store::RecordStore;

/// Reads listings from a PostgREST (or Supabase REST) endpoint in front of
/// the listings table.
pub struct PostgrestStore {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl PostgrestStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: listings_endpoint(&config.base_url, &config.table)?,
            api_key: config.api_key.clone(),
        })
    }
}

/// `{base_url}/{table}?select=id,title,description,price,location,created_at`
fn listings_endpoint(base_url: &str, table: &str) -> Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        table.trim_matches('/')
    ))?;
    url.query_pairs_mut()
        .append_pair("select", &LISTING_FIELDS.join(","));
    Ok(url)
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn fetch_all_listings(&self) -> Result<Vec<Listing>> {
        debug!("Querying record store: {}", self.endpoint);

        let mut request = self
            .http
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json");
        if let Some(ref key) = self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Record store error ({status}): {body}");
            return Err(PropertyCacheError::Store {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let listings: Vec<Listing> = serde_json::from_str(&body)?;
        debug!("Record store returned {} listings", listings.len());
        Ok(listings)
    }
}
