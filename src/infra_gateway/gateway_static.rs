use crate::application_port::CheckoutError;
use crate::domain_model::PaymentIntent;
use crate::domain_port::PaymentGateway;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

// Offline stand-in for the payment provider: echoes the request back as a
// created intent with a counted id. Used by the "static" gateway backend
// and the unit tests.
#[derive(Default)]
pub struct StaticPaymentGateway {
    next_id: AtomicU64,
}

impl StaticPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PaymentGateway for StaticPaymentGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentIntent, CheckoutError> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(PaymentIntent {
            id: format!("order_static_{}", n),
            amount,
            currency: currency.to_string(),
            receipt: receipt.to_string(),
            status: "created".to_string(),
            created_at: Some(Utc::now().timestamp()),
        })
    }
}
