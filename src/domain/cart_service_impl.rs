use crate::application_port::{AddItemInput, CartError, CartService};
use crate::domain_model::{LineItem, ProductId};
use crate::domain_port::CartRepo;
use std::sync::Arc;

pub struct RealCartService {
    cart_repo: Arc<dyn CartRepo>,
}

impl RealCartService {
    pub fn new(cart_repo: Arc<dyn CartRepo>) -> Self {
        RealCartService { cart_repo }
    }
}

#[async_trait::async_trait]
impl CartService for RealCartService {
    async fn add(&self, username: &str, input: AddItemInput) -> Result<(), CartError> {
        if input.quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        let item = LineItem {
            product_id: input.product_id,
            title: input.title,
            price: input.price,
            image_url: input.image_url,
            quantity: input.quantity,
        };
        self.cart_repo.upsert_item(username, &item).await
    }

    async fn items(&self, username: &str) -> Result<Vec<LineItem>, CartError> {
        self.cart_repo.items(username).await
    }

    async fn remove_item(&self, username: &str, product_id: &ProductId) -> Result<(), CartError> {
        self.cart_repo.remove_item(username, product_id).await
    }

    async fn clear(&self, username: &str) -> Result<(), CartError> {
        self.cart_repo.clear(username).await
    }

    async fn increment(&self, username: &str, product_id: &ProductId) -> Result<(), CartError> {
        let matched = self.cart_repo.increment(username, product_id).await?;
        if matched == 0 {
            return Err(CartError::ItemNotFound);
        }
        Ok(())
    }

    async fn decrement(&self, username: &str, product_id: &ProductId) -> Result<(), CartError> {
        let changed = self
            .cart_repo
            .decrement_above_floor(username, product_id)
            .await?;
        if changed == 0 {
            // Distinguish the quantity-1 floor (a successful no-op) from a
            // missing item.
            if !self.cart_repo.contains(username, product_id).await? {
                return Err(CartError::ItemNotFound);
            }
        }
        Ok(())
    }
}
