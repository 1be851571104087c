use crate::application_port::CartError;
use crate::domain_model::{LineItem, ProductId};

/// One cart per username; insertion order of line items is preserved.
///
/// Every operation is a single atomic store operation. Quantity
/// adjustment in particular is store-side fetch-and-add, never a
/// read-modify-write pair, so concurrent requests for the same user
/// cannot lose updates.
#[async_trait::async_trait]
pub trait CartRepo: Send + Sync {
    /// Insert the item, or add `item.quantity` to the existing item's
    /// quantity if the product is already carted.
    async fn upsert_item(&self, username: &str, item: &LineItem) -> Result<(), CartError>;

    async fn items(&self, username: &str) -> Result<Vec<LineItem>, CartError>;

    async fn remove_item(&self, username: &str, product_id: &ProductId) -> Result<(), CartError>;

    async fn clear(&self, username: &str) -> Result<(), CartError>;

    /// quantity += 1 on the matching item; returns the number of items
    /// matched (0 when the item is absent).
    async fn increment(&self, username: &str, product_id: &ProductId) -> Result<u64, CartError>;

    /// quantity -= 1 on the matching item where quantity > 1; returns the
    /// number of items changed (0 at the floor or when absent).
    async fn decrement_above_floor(
        &self,
        username: &str,
        product_id: &ProductId,
    ) -> Result<u64, CartError>;

    async fn contains(&self, username: &str, product_id: &ProductId) -> Result<bool, CartError>;
}
