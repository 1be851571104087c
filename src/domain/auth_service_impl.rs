use crate::application_port::{
    AuthError, AuthService, AuthToken, CredentialHasher, IssuedToken, LoginInput, SignupInput,
    TokenCodec, UserProfile,
};
use crate::domain_model::{Identity, UserId};
use crate::domain_port::UserRepo;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub struct Argon2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::InternalError(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::InternalError(format!("invalid PHC hash: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::InternalError(format!("verify error: {}", e))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Tokens self-contain identity and expiry; there is no server-side
    /// session state and no revocation before expiry.
    pub token_ttl: Duration,
    pub signing_key: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String, // user id as string
    username: String,
    iat: i64,
    exp: i64,
}

fn encode_token(
    uid: UserId,
    username: &str,
    cfg: &JwtConfig,
) -> Result<(String, DateTime<Utc>), AuthError> {
    let iat_dt = Utc::now();
    let exp_dt = iat_dt + cfg.token_ttl;
    let claims = TokenClaims {
        sub: uid.0.to_string(),
        username: username.to_string(),
        iat: iat_dt.timestamp(),
        exp: exp_dt.timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&cfg.signing_key),
    )
    .map_err(|e| AuthError::InternalError(e.to_string()))?;
    Ok((token, exp_dt))
}

fn decode_token(token: &str, cfg: &JwtConfig) -> Result<TokenClaims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&cfg.signing_key), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })?;
    Ok(data.claims)
}

pub struct JwtHs256Codec {
    cfg: JwtConfig,
}

impl JwtHs256Codec {
    pub fn new(cfg: JwtConfig) -> Self {
        JwtHs256Codec { cfg }
    }
}

#[async_trait::async_trait]
impl TokenCodec for JwtHs256Codec {
    async fn issue(&self, user: UserId, username: &str) -> Result<IssuedToken, AuthError> {
        let (token, exp_dt) = encode_token(user, username, &self.cfg)?;
        Ok(IssuedToken {
            token: AuthToken(token),
            expires_at: exp_dt,
        })
    }

    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = decode_token(token, &self.cfg)?;
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::TokenInvalid)?;
        Ok(Identity {
            user_id,
            username: claims.username,
        })
    }
}

pub struct RealAuthService {
    user_repo: Arc<dyn UserRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_codec: Arc<dyn TokenCodec>,
}

impl RealAuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_codec: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            user_repo,
            credential_hasher,
            token_codec,
        }
    }

    #[inline]
    fn new_user_id() -> UserId {
        UserId(Uuid::new_v4())
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn signup(&self, request: SignupInput) -> Result<IssuedToken, AuthError> {
        let SignupInput {
            username,
            password,
            number,
        } = request;

        if username.is_empty() || password.is_empty() || number.is_empty() {
            return Err(AuthError::MissingFields);
        }

        if self.user_repo.username_exists(&username).await? {
            return Err(AuthError::UserExists);
        }

        let user_id = Self::new_user_id();
        let password_hash = self.credential_hasher.hash_password(&password).await?;
        self.user_repo
            .create(user_id, &username, &password_hash, &number)
            .await?;

        self.token_codec.issue(user_id, &username).await
    }

    async fn login(&self, request: LoginInput) -> Result<IssuedToken, AuthError> {
        let LoginInput { username, password } = request;

        let rec = self
            .user_repo
            .get_by_username(&username)
            .await?
            .ok_or(AuthError::UnknownUsername)?;

        let ok = self
            .credential_hasher
            .verify_password(&password, &rec.password_hash)
            .await?;
        if !ok {
            return Err(AuthError::InvalidPassword);
        }

        self.token_codec.issue(rec.user_id, &rec.username).await
    }

    async fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        self.token_codec.verify(token).await
    }

    async fn profile(&self, token: &str) -> Result<UserProfile, AuthError> {
        let identity = self.token_codec.verify(token).await?;

        let rec = self
            .user_repo
            .get_by_username(&identity.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserProfile {
            id: rec.user_id,
            username: rec.username,
            number: rec.number,
            created_at: rec.created_at,
        })
    }
}
