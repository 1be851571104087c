use crate::domain_model::{LineItem, ProductId};

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Item not found in cart")]
    ItemNotFound,
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("store error: {0}")]
    Store(String),
}

#[derive(Debug, Clone)]
pub struct AddItemInput {
    pub product_id: ProductId,
    pub title: String,
    pub price: i64,
    pub image_url: String,
    pub quantity: i64,
}

/// Cart operations are always scoped to the authenticated caller's
/// username; identity is never taken from the request body.
#[async_trait::async_trait]
pub trait CartService: Send + Sync {
    /// Add-or-merge: an item already in the cart has its quantity
    /// increased by `input.quantity`, otherwise the item is appended.
    async fn add(&self, username: &str, input: AddItemInput) -> Result<(), CartError>;

    /// The caller's line items, `[]` if no cart exists yet.
    async fn items(&self, username: &str) -> Result<Vec<LineItem>, CartError>;

    /// Delete the matching item. No-op if absent.
    async fn remove_item(&self, username: &str, product_id: &ProductId) -> Result<(), CartError>;

    /// Empty the cart. No-op if no cart exists.
    async fn clear(&self, username: &str) -> Result<(), CartError>;

    /// quantity += 1; `ItemNotFound` if the item is absent.
    async fn increment(&self, username: &str, product_id: &ProductId) -> Result<(), CartError>;

    /// quantity -= 1, flooring at 1 (the floor hit is a success);
    /// `ItemNotFound` if the item is absent.
    async fn decrement(&self, username: &str, product_id: &ProductId) -> Result<(), CartError>;
}
