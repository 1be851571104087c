use crate::domain_model::{LineItem, Order, PaymentIntent};

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("User not found")]
    UserNotFound,
    #[error("gateway error: {0}")]
    Gateway(String),
    #[error("store error: {0}")]
    Store(String),
}

#[derive(Debug, Clone)]
pub struct VerifyPaymentInput {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

#[derive(Debug, Clone)]
pub struct FinalizeOrderInput {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
    pub items: Vec<LineItem>,
    pub total_amount: i64,
}

/// The checkout handshake. The client orchestrates: create an intent, pay
/// out-of-band, submit the gateway's signature, then finalize. Finalize
/// re-checks the signature itself, so an unverified payment can never
/// persist an order.
#[async_trait::async_trait]
pub trait CheckoutService: Send + Sync {
    /// `amount` is in major currency units; the gateway is driven in minor
    /// units (x100).
    async fn create_intent(&self, amount: i64) -> Result<PaymentIntent, CheckoutError>;

    /// Pure check: recompute the HMAC over `order_id|payment_id` and
    /// compare. No state is read or written.
    async fn verify_payment(&self, input: VerifyPaymentInput) -> Result<(), CheckoutError>;

    /// Verify, persist a PAID order from the submitted snapshot, then
    /// clear the caller's cart.
    async fn finalize(&self, username: &str, input: FinalizeOrderInput)
    -> Result<(), CheckoutError>;

    async fn orders_for(&self, username: &str) -> Result<Vec<Order>, CheckoutError>;
}
