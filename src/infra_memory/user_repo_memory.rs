use crate::application_port::AuthError;
use crate::domain_model::UserId;
use crate::domain_port::{UserRecord, UserRepo};
use chrono::Utc;
use dashmap::DashMap;

/// Keyed by username, the user's identity.
#[derive(Default)]
pub struct MemoryUserRepo {
    users: DashMap<String, UserRecord>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(
        &self,
        user_id: UserId,
        username: &str,
        password_hash: &str,
        number: &str,
    ) -> Result<(), AuthError> {
        if self.users.contains_key(username) {
            return Err(AuthError::UserExists);
        }
        self.users.insert(
            username.to_string(),
            UserRecord {
                user_id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                number: number.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        Ok(self.users.get(username).map(|r| r.clone()))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self.users.contains_key(username))
    }
}
