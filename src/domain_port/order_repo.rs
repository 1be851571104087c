use crate::application_port::CheckoutError;
use crate::domain_model::{Order, UserId};

#[async_trait::async_trait]
pub trait OrderRepo: Send + Sync {
    async fn create(&self, order: &Order) -> Result<(), CheckoutError>;

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, CheckoutError>;
}
