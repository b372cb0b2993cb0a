use async_trait::async_trait;

use crate::domain::listing::Listing;
use crate::error::Result;

/// Persistent source of truth for listings.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All listings projected to the six cached fields, in store-defined order.
    async fn fetch_all_listings(&self) -> Result<Vec<Listing>>;
}
