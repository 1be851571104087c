use crate::application_port::{
    CheckoutError, CheckoutService, FinalizeOrderInput, VerifyPaymentInput,
};
use crate::domain_model::{Order, OrderStatus, PaymentIntent};
use crate::domain_port::{CartRepo, OrderRepo, PaymentGateway, UserRepo};
use chrono::Utc;
use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use std::sync::Arc;

/// hex(HMAC-SHA256(secret, "<order_id>|<payment_id>")) — the proof that a
/// payment response was issued by the gateway and not forged.
pub fn expected_signature(
    secret: &[u8],
    order_id: &str,
    payment_id: &str,
) -> anyhow::Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub struct RealCheckoutService {
    gateway: Arc<dyn PaymentGateway>,
    user_repo: Arc<dyn UserRepo>,
    cart_repo: Arc<dyn CartRepo>,
    order_repo: Arc<dyn OrderRepo>,
    currency: String,
    signing_secret: Vec<u8>,
}

impl RealCheckoutService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        user_repo: Arc<dyn UserRepo>,
        cart_repo: Arc<dyn CartRepo>,
        order_repo: Arc<dyn OrderRepo>,
        currency: String,
        signing_secret: Vec<u8>,
    ) -> Self {
        Self {
            gateway,
            user_repo,
            cart_repo,
            order_repo,
            currency,
            signing_secret,
        }
    }

    fn check_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        supplied: &str,
    ) -> Result<(), CheckoutError> {
        let expected = expected_signature(&self.signing_secret, order_id, payment_id)
            .map_err(|e| CheckoutError::Store(e.to_string()))?;
        if expected != supplied {
            return Err(CheckoutError::InvalidSignature);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CheckoutService for RealCheckoutService {
    async fn create_intent(&self, amount: i64) -> Result<PaymentIntent, CheckoutError> {
        if amount <= 0 {
            return Err(CheckoutError::InvalidAmount);
        }
        let minor = amount
            .checked_mul(100)
            .ok_or(CheckoutError::InvalidAmount)?;
        let receipt = format!("receipt_{}", Utc::now().timestamp_millis());

        self.gateway
            .create_intent(minor, &self.currency, &receipt)
            .await
    }

    async fn verify_payment(&self, input: VerifyPaymentInput) -> Result<(), CheckoutError> {
        self.check_signature(
            &input.gateway_order_id,
            &input.gateway_payment_id,
            &input.signature,
        )
    }

    async fn finalize(
        &self,
        username: &str,
        input: FinalizeOrderInput,
    ) -> Result<(), CheckoutError> {
        // Finalization proves the payment itself rather than trusting an
        // earlier /verify-payment call.
        self.check_signature(
            &input.gateway_order_id,
            &input.gateway_payment_id,
            &input.signature,
        )?;

        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .map_err(|e| CheckoutError::Store(e.to_string()))?
            .ok_or(CheckoutError::UserNotFound)?;

        let order = Order {
            order_id: input.gateway_order_id,
            payment_id: input.gateway_payment_id,
            user_id: user.user_id,
            items: input.items,
            total_amount: input.total_amount,
            status: OrderStatus::Paid,
            created_at: Utc::now(),
        };
        self.order_repo.create(&order).await?;

        self.cart_repo
            .clear(username)
            .await
            .map_err(|e| CheckoutError::Store(e.to_string()))?;

        Ok(())
    }

    async fn orders_for(&self, username: &str) -> Result<Vec<Order>, CheckoutError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .map_err(|e| CheckoutError::Store(e.to_string()))?
            .ok_or(CheckoutError::UserNotFound)?;

        self.order_repo.list_for_user(user.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::{LineItem, ProductId, UserId};
    use crate::infra_gateway::StaticPaymentGateway;
    use crate::infra_memory::{MemoryCartRepo, MemoryOrderRepo, MemoryUserRepo};
    use chrono::Utc;

    const SECRET: &[u8] = b"gateway-test-secret";

    struct Fixture {
        service: RealCheckoutService,
        cart_repo: Arc<MemoryCartRepo>,
        order_repo: Arc<MemoryOrderRepo>,
        user_repo: Arc<MemoryUserRepo>,
    }

    fn fixture() -> Fixture {
        let cart_repo = Arc::new(MemoryCartRepo::new());
        let order_repo = Arc::new(MemoryOrderRepo::new());
        let user_repo = Arc::new(MemoryUserRepo::new());
        let service = RealCheckoutService::new(
            Arc::new(StaticPaymentGateway::new()),
            user_repo.clone(),
            cart_repo.clone(),
            order_repo.clone(),
            "INR".to_string(),
            SECRET.to_vec(),
        );
        Fixture {
            service,
            cart_repo,
            order_repo,
            user_repo,
        }
    }

    async fn seed_user(fx: &Fixture, username: &str) -> UserId {
        let id = UserId(uuid::Uuid::new_v4());
        fx.user_repo
            .create(id, username, "$argon2id$fake", "555")
            .await
            .unwrap();
        id
    }

    fn line_item(product_id: &str, quantity: i64) -> LineItem {
        LineItem {
            product_id: ProductId::from(product_id),
            title: product_id.to_string(),
            price: 10,
            image_url: String::new(),
            quantity,
        }
    }

    fn finalize_input(signature: String) -> FinalizeOrderInput {
        FinalizeOrderInput {
            gateway_order_id: "order_1".to_string(),
            gateway_payment_id: "pay_1".to_string(),
            signature,
            items: vec![line_item("P1", 2)],
            total_amount: 20,
        }
    }

    #[test]
    fn signature_is_deterministic_and_order_sensitive() {
        let a = expected_signature(SECRET, "order_1", "pay_1").unwrap();
        let b = expected_signature(SECRET, "order_1", "pay_1").unwrap();
        assert_eq!(a, b);

        let swapped = expected_signature(SECRET, "pay_1", "order_1").unwrap();
        assert_ne!(a, swapped);
    }

    #[tokio::test]
    async fn verify_accepts_the_correct_signature() {
        let fx = fixture();
        let sig = expected_signature(SECRET, "order_1", "pay_1").unwrap();
        fx.service
            .verify_payment(VerifyPaymentInput {
                gateway_order_id: "order_1".to_string(),
                gateway_payment_id: "pay_1".to_string(),
                signature: sig,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn verify_rejects_any_single_character_mutation() {
        let fx = fixture();
        let sig = expected_signature(SECRET, "order_1", "pay_1").unwrap();

        for i in 0..sig.len() {
            let mut mutated: Vec<u8> = sig.clone().into_bytes();
            mutated[i] = if mutated[i] == b'0' { b'1' } else { b'0' };
            let err = fx
                .service
                .verify_payment(VerifyPaymentInput {
                    gateway_order_id: "order_1".to_string(),
                    gateway_payment_id: "pay_1".to_string(),
                    signature: String::from_utf8(mutated).unwrap(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, CheckoutError::InvalidSignature));
        }
    }

    #[tokio::test]
    async fn create_intent_converts_to_minor_units() {
        let fx = fixture();
        let intent = fx.service.create_intent(499).await.unwrap();
        assert_eq!(intent.amount, 49900);
        assert_eq!(intent.currency, "INR");
        assert!(intent.receipt.starts_with("receipt_"));
    }

    #[tokio::test]
    async fn create_intent_rejects_non_positive_amounts() {
        let fx = fixture();
        assert!(matches!(
            fx.service.create_intent(0).await.unwrap_err(),
            CheckoutError::InvalidAmount
        ));
        assert!(matches!(
            fx.service.create_intent(-5).await.unwrap_err(),
            CheckoutError::InvalidAmount
        ));
    }

    #[tokio::test]
    async fn finalize_persists_order_and_clears_cart() {
        let fx = fixture();
        let user_id = seed_user(&fx, "alice").await;
        fx.cart_repo
            .upsert_item("alice", &line_item("P1", 2))
            .await
            .unwrap();

        let sig = expected_signature(SECRET, "order_1", "pay_1").unwrap();
        fx.service
            .finalize("alice", finalize_input(sig))
            .await
            .unwrap();

        let orders = fx.order_repo.list_for_user(user_id).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "order_1");
        assert_eq!(orders[0].payment_id, "pay_1");
        assert_eq!(orders[0].status, OrderStatus::Paid);
        assert_eq!(orders[0].total_amount, 20);
        assert_eq!(orders[0].items, vec![line_item("P1", 2)]);
        assert!(orders[0].created_at <= Utc::now());

        assert!(fx.cart_repo.items("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn finalize_with_forged_signature_persists_nothing() {
        let fx = fixture();
        let user_id = seed_user(&fx, "alice").await;
        fx.cart_repo
            .upsert_item("alice", &line_item("P1", 2))
            .await
            .unwrap();

        let err = fx
            .service
            .finalize("alice", finalize_input("deadbeef".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidSignature));

        assert!(fx.order_repo.list_for_user(user_id).await.unwrap().is_empty());
        assert_eq!(fx.cart_repo.items("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn finalize_for_unknown_user_is_not_found() {
        let fx = fixture();
        let sig = expected_signature(SECRET, "order_1", "pay_1").unwrap();
        let err = fx
            .service
            .finalize("ghost", finalize_input(sig))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::UserNotFound));
    }

    #[tokio::test]
    async fn orders_are_listed_per_user() {
        let fx = fixture();
        seed_user(&fx, "alice").await;
        let bob_id = seed_user(&fx, "bob").await;

        let sig = expected_signature(SECRET, "order_1", "pay_1").unwrap();
        fx.service
            .finalize("alice", finalize_input(sig))
            .await
            .unwrap();

        let alice_orders = fx.service.orders_for("alice").await.unwrap();
        assert_eq!(alice_orders.len(), 1);
        assert!(fx.order_repo.list_for_user(bob_id).await.unwrap().is_empty());
    }
}
