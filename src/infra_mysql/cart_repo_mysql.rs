use crate::application_port::CartError;
use crate::domain_model::{LineItem, ProductId};
use crate::domain_port::CartRepo;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// cart_item has a UNIQUE (username, product_id) key; the auto-increment
/// row id preserves insertion order. All quantity adjustments are single
/// UPDATE/INSERT statements, so concurrent requests for the same user
/// cannot lose an increment.
pub struct MySqlCartRepo {
    pool: MySqlPool,
}

impl MySqlCartRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlCartRepo { pool }
    }

    fn row_to_item(row: MySqlRow) -> Result<LineItem, CartError> {
        let product_id: String = row
            .try_get("product_id")
            .map_err(|e| CartError::Store(e.to_string()))?;
        let title: String = row
            .try_get("title")
            .map_err(|e| CartError::Store(e.to_string()))?;
        let price: i64 = row
            .try_get("price")
            .map_err(|e| CartError::Store(e.to_string()))?;
        let image_url: String = row
            .try_get("image_url")
            .map_err(|e| CartError::Store(e.to_string()))?;
        let quantity: i64 = row
            .try_get("quantity")
            .map_err(|e| CartError::Store(e.to_string()))?;

        Ok(LineItem {
            product_id: ProductId(product_id),
            title,
            price,
            image_url,
            quantity,
        })
    }
}

#[async_trait::async_trait]
impl CartRepo for MySqlCartRepo {
    async fn upsert_item(&self, username: &str, item: &LineItem) -> Result<(), CartError> {
        sqlx::query(
            r#"
INSERT INTO cart_item (username, product_id, title, price, image_url, quantity)
VALUES (?, ?, ?, ?, ?, ?)
ON DUPLICATE KEY UPDATE quantity = quantity + VALUES(quantity)
"#,
        )
        .bind(username)
        .bind(&item.product_id.0)
        .bind(&item.title)
        .bind(item.price)
        .bind(&item.image_url)
        .bind(item.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| CartError::Store(e.to_string()))?;

        Ok(())
    }

    async fn items(&self, username: &str) -> Result<Vec<LineItem>, CartError> {
        let rows = sqlx::query(
            r#"
SELECT product_id, title, price, image_url, quantity
FROM cart_item
WHERE username = ?
ORDER BY id
"#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CartError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn remove_item(&self, username: &str, product_id: &ProductId) -> Result<(), CartError> {
        sqlx::query(r#"DELETE FROM cart_item WHERE username = ? AND product_id = ?"#)
            .bind(username)
            .bind(&product_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| CartError::Store(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, username: &str) -> Result<(), CartError> {
        sqlx::query(r#"DELETE FROM cart_item WHERE username = ?"#)
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| CartError::Store(e.to_string()))?;

        Ok(())
    }

    async fn increment(&self, username: &str, product_id: &ProductId) -> Result<u64, CartError> {
        let result = sqlx::query(
            r#"
UPDATE cart_item
SET quantity = quantity + 1
WHERE username = ? AND product_id = ?
"#,
        )
        .bind(username)
        .bind(&product_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| CartError::Store(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn decrement_above_floor(
        &self,
        username: &str,
        product_id: &ProductId,
    ) -> Result<u64, CartError> {
        let result = sqlx::query(
            r#"
UPDATE cart_item
SET quantity = quantity - 1
WHERE username = ? AND product_id = ? AND quantity > 1
"#,
        )
        .bind(username)
        .bind(&product_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| CartError::Store(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn contains(&self, username: &str, product_id: &ProductId) -> Result<bool, CartError> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM cart_item WHERE username = ? AND product_id = ?"#,
        )
        .bind(username)
        .bind(&product_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CartError::Store(e.to_string()))?;

        Ok(count > 0)
    }
}
