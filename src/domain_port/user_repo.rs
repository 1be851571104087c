use crate::application_port::AuthError;
use crate::domain_model::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
    pub password_hash: String,
    pub number: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a new user. A duplicate username maps to `AuthError::UserExists`.
    async fn create(
        &self,
        user_id: UserId,
        username: &str,
        password_hash: &str,
        number: &str,
    ) -> Result<(), AuthError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError>;
}
