use super::util::is_dup_key;
use crate::application_port::AuthError;
use crate::domain_model::UserId;
use crate::domain_port::{UserRecord, UserRepo};
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }

    #[inline]
    fn uid_as_bytes(id: &UserId) -> &[u8] {
        id.0.as_bytes()
    }

    fn uid_from_bytes(id: &[u8]) -> Result<UserId, AuthError> {
        Ok(UserId(
            Uuid::from_slice(id).map_err(|e| AuthError::Store(e.to_string()))?,
        ))
    }

    fn row_to_record(row: MySqlRow) -> Result<UserRecord, AuthError> {
        let user_id_bytes: Vec<u8> = row
            .try_get("user_id")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let user_id = Self::uid_from_bytes(&user_id_bytes)?;

        let username: String = row
            .try_get("username")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let number: String = row
            .try_get("phone_number")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(UserRecord {
            user_id,
            username,
            password_hash,
            number,
            created_at,
        })
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn create(
        &self,
        user_id: UserId,
        username: &str,
        password_hash: &str,
        number: &str,
    ) -> Result<(), AuthError> {
        sqlx::query(
            r#"
INSERT INTO user (user_id, username, password_hash, phone_number)
VALUES (?, ?, ?, ?)
"#,
        )
        .bind(Self::uid_as_bytes(&user_id))
        .bind(username)
        .bind(password_hash)
        .bind(number)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_dup_key(&e) {
                AuthError::UserExists
            } else {
                AuthError::Store(e.to_string())
            }
        })?;

        Ok(())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT user_id, username, password_hash, phone_number, created_at
FROM user
WHERE username = ?
"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_record).transpose()
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM user WHERE username = ?"#)
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(count > 0)
    }
}
