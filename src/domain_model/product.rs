use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s.to_string())
    }
}

/// Unit prices are integers in major currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: i64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub enum PriceSort {
    #[serde(rename = "PRICE_HIGH")]
    PriceHigh,
    #[serde(rename = "PRICE_LOW")]
    PriceLow,
}

/// Filters are conjunctive; `None` means "do not filter on this".
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub title_search: Option<String>,
    pub min_rating: Option<f64>,
    pub sort_by: Option<PriceSort>,
}
