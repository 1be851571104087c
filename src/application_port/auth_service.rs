use crate::domain_model::{Identity, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingFields,
    #[error("User already exists")]
    UserExists,
    #[error("Invalid username")]
    UnknownUsername,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("user not found")]
    UserNotFound,
    #[error("token invalid")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub password: String,
    pub number: String,
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthToken(pub String);

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: AuthToken,
    pub expires_at: DateTime<Utc>,
}

/// Everything about a user that callers are allowed to see. The password
/// hash never leaves the repo layer.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub number: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait TokenCodec: Send + Sync {
    async fn issue(&self, user: UserId, username: &str) -> Result<IssuedToken, AuthError>;
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn signup(&self, request: SignupInput) -> Result<IssuedToken, AuthError>;
    async fn login(&self, request: LoginInput) -> Result<IssuedToken, AuthError>;
    async fn verify_token(&self, token: &str) -> Result<Identity, AuthError>;
    async fn profile(&self, token: &str) -> Result<UserProfile, AuthError>;
}
