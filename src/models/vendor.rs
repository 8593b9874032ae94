use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorService {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub min_price: Decimal,
    pub max_price: Decimal,
    #[serde(default)]
    pub services: Vec<VendorService>,
}

impl Vendor {
    pub fn service(&self, service_id: &str) -> Option<&VendorService> {
        self.services.iter().find(|s| s.id == service_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    Rating,
    ReviewCount,
}

impl SortBy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "priceAsc" => Some(SortBy::PriceAsc),
            "priceDesc" => Some(SortBy::PriceDesc),
            "rating" => Some(SortBy::Rating),
            "reviewCount" => Some(SortBy::ReviewCount),
            _ => None,
        }
    }
}

/// Raw search parameters; unparseable values are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorSearch {
    pub query: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<String>,
    pub min_rating: Option<String>,
    pub sort_by: Option<String>,
}
