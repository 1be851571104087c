use super::ProductId;
use serde::{Deserialize, Serialize};

/// One product entry within a cart or an order snapshot.
///
/// Invariant: quantity >= 1. The decrement operation floors at 1; removal
/// is a separate explicit operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub title: String,
    pub price: i64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub quantity: i64,
}
