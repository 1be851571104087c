use crate::application_port::CheckoutError;
use crate::domain_model::PaymentIntent;

/// Narrow client for the external payment provider. The gateway owns the
/// intent lifecycle; we only hold on to the ids it returns.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `amount` is in minor currency units.
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentIntent, CheckoutError>;
}
