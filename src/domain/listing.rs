use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Field names of the listing projection, in the order the store is asked for them.
pub const LISTING_FIELDS: [&str; 6] = [
    "id",
    "title",
    "description",
    "price",
    "location",
    "created_at",
];

/// A property listing reduced to the six fields served from the cache.
///
/// `price` serializes as a decimal string (`"1250.50"`) so the cached
/// snapshot carries it without float rounding; store rows may send it as a
/// JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Response body shared by the HTTP and MCP surfaces: `{"data": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsEnvelope {
    pub data: Vec<Listing>,
}

impl From<Vec<Listing>> for ListingsEnvelope {
    fn from(data: Vec<Listing>) -> Self {
        Self { data }
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} - {} ({:.2}, listed {})",
            self.id,
            self.title,
            self.location,
            self.price,
            self.created_at.format("%Y-%m-%d")
        )
    }
}
