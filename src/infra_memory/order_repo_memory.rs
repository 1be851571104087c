use crate::application_port::CheckoutError;
use crate::domain_model::{Order, UserId};
use crate::domain_port::OrderRepo;
use dashmap::DashMap;

#[derive(Default)]
pub struct MemoryOrderRepo {
    orders: DashMap<UserId, Vec<Order>>,
}

impl MemoryOrderRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OrderRepo for MemoryOrderRepo {
    async fn create(&self, order: &Order) -> Result<(), CheckoutError> {
        self.orders
            .entry(order.user_id)
            .or_default()
            .push(order.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, CheckoutError> {
        Ok(self
            .orders
            .get(&user_id)
            .map(|orders| orders.clone())
            .unwrap_or_default())
    }
}
