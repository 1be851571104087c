use crate::application_port::CartError;
use crate::domain_model::{LineItem, ProductId};
use crate::domain_port::CartRepo;
use dashmap::DashMap;

/// One entry per username; the Vec preserves insertion order. Each
/// operation holds the shard lock for the whole adjustment, which gives
/// the same lost-update-free behavior the SQL backend gets from atomic
/// UPDATEs.
#[derive(Default)]
pub struct MemoryCartRepo {
    carts: DashMap<String, Vec<LineItem>>,
}

impl MemoryCartRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CartRepo for MemoryCartRepo {
    async fn upsert_item(&self, username: &str, item: &LineItem) -> Result<(), CartError> {
        let mut items = self.carts.entry(username.to_string()).or_default();
        match items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => existing.quantity += item.quantity,
            None => items.push(item.clone()),
        }
        Ok(())
    }

    async fn items(&self, username: &str) -> Result<Vec<LineItem>, CartError> {
        Ok(self
            .carts
            .get(username)
            .map(|items| items.clone())
            .unwrap_or_default())
    }

    async fn remove_item(&self, username: &str, product_id: &ProductId) -> Result<(), CartError> {
        if let Some(mut items) = self.carts.get_mut(username) {
            items.retain(|i| &i.product_id != product_id);
        }
        Ok(())
    }

    async fn clear(&self, username: &str) -> Result<(), CartError> {
        if let Some(mut items) = self.carts.get_mut(username) {
            items.clear();
        }
        Ok(())
    }

    async fn increment(&self, username: &str, product_id: &ProductId) -> Result<u64, CartError> {
        if let Some(mut items) = self.carts.get_mut(username) {
            if let Some(item) = items.iter_mut().find(|i| &i.product_id == product_id) {
                item.quantity += 1;
                return Ok(1);
            }
        }
        Ok(0)
    }

    async fn decrement_above_floor(
        &self,
        username: &str,
        product_id: &ProductId,
    ) -> Result<u64, CartError> {
        if let Some(mut items) = self.carts.get_mut(username) {
            if let Some(item) = items.iter_mut().find(|i| &i.product_id == product_id) {
                if item.quantity > 1 {
                    item.quantity -= 1;
                    return Ok(1);
                }
            }
        }
        Ok(0)
    }

    async fn contains(&self, username: &str, product_id: &ProductId) -> Result<bool, CartError> {
        Ok(self
            .carts
            .get(username)
            .map(|items| items.iter().any(|i| &i.product_id == product_id))
            .unwrap_or(false))
    }
}
