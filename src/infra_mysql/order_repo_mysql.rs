use crate::application_port::CheckoutError;
use crate::domain_model::{LineItem, Order, OrderStatus, UserId};
use crate::domain_port::OrderRepo;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

/// Orders are append-only; the line-item snapshot is stored as a JSON
/// text column since it is only ever read back whole.
pub struct MySqlOrderRepo {
    pool: MySqlPool,
}

impl MySqlOrderRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlOrderRepo { pool }
    }

    fn row_to_order(row: MySqlRow) -> Result<Order, CheckoutError> {
        let order_id: String = row
            .try_get("gateway_order_id")
            .map_err(|e| CheckoutError::Store(e.to_string()))?;
        let payment_id: String = row
            .try_get("gateway_payment_id")
            .map_err(|e| CheckoutError::Store(e.to_string()))?;
        let user_id_bytes: Vec<u8> = row
            .try_get("user_id")
            .map_err(|e| CheckoutError::Store(e.to_string()))?;
        let user_id = UserId(
            Uuid::from_slice(&user_id_bytes).map_err(|e| CheckoutError::Store(e.to_string()))?,
        );
        let items_json: String = row
            .try_get("items")
            .map_err(|e| CheckoutError::Store(e.to_string()))?;
        let items: Vec<LineItem> = serde_json::from_str(&items_json)
            .map_err(|e| CheckoutError::Store(format!("decode items: {}", e)))?;
        let total_amount: i64 = row
            .try_get("total_amount")
            .map_err(|e| CheckoutError::Store(e.to_string()))?;
        let status: OrderStatus = row
            .try_get("status")
            .map_err(|e| CheckoutError::Store(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| CheckoutError::Store(e.to_string()))?;

        Ok(Order {
            order_id,
            payment_id,
            user_id,
            items,
            total_amount,
            status,
            created_at,
        })
    }
}

#[async_trait::async_trait]
impl OrderRepo for MySqlOrderRepo {
    async fn create(&self, order: &Order) -> Result<(), CheckoutError> {
        let items_json = serde_json::to_string(&order.items)
            .map_err(|e| CheckoutError::Store(format!("encode items: {}", e)))?;

        sqlx::query(
            r#"
INSERT INTO orders (gateway_order_id, gateway_payment_id, user_id, items, total_amount, status, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(&order.order_id)
        .bind(&order.payment_id)
        .bind(order.user_id.0.as_bytes() as &[u8])
        .bind(items_json)
        .bind(order.total_amount)
        .bind(order.status)
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CheckoutError::Store(e.to_string()))?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, CheckoutError> {
        let rows = sqlx::query(
            r#"
SELECT gateway_order_id, gateway_payment_id, user_id, items, total_amount, status, created_at
FROM orders
WHERE user_id = ?
ORDER BY id
"#,
        )
        .bind(user_id.0.as_bytes() as &[u8])
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CheckoutError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_order).collect()
    }
}
