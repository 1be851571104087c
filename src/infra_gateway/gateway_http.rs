use crate::application_port::CheckoutError;
use crate::domain_model::PaymentIntent;
use crate::domain_port::PaymentGateway;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CreateIntentRequest<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

/// Razorpay-style orders API: POST /v1/orders with key-id/key-secret
/// basic auth. Whatever timeout the client defaults to is what we get;
/// there is deliberately no retry.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    endpoint: String,
    key_id: String,
    key_secret: String,
}

impl HttpPaymentGateway {
    pub fn new(endpoint: String, key_id: String, key_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            key_id,
            key_secret,
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentIntent, CheckoutError> {
        let url = format!("{}/v1/orders", self.endpoint.trim_end_matches('/'));
        let body = CreateIntentRequest {
            amount,
            currency,
            receipt,
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| CheckoutError::Gateway(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| CheckoutError::Gateway(e.to_string()))?;

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|e| CheckoutError::Gateway(format!("decode intent: {}", e)))
    }
}
