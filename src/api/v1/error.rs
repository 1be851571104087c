use crate::application_port::{AuthError, CartError, CatalogError, CheckoutError};
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

/// Every failure leaves the API as `{"message": ...}` with a status from
/// the taxonomy: validation 400, missing token 401, bad token 403, not
/// found 404, gateway/store 500. Underlying causes are logged, never
/// exposed.
#[derive(Debug, Clone, Error)]
pub enum ApiErrorCode {
    #[error("All fields are required")]
    MissingFields,
    #[error("User already exists")]
    UserExists,
    #[error("Invalid username")]
    UnknownUsername,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    /// The profile route decodes its header by hand and rejects with 401
    /// rather than the gate's 403.
    #[error("Invalid token")]
    ProfileTokenRejected,
    #[error("Product not found")]
    ProductNotFound,
    #[error("Item not found in cart")]
    CartItemNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Order creation failed")]
    GatewayFailure,
    #[error("Internal server error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("internal error: {}", error);
        ApiErrorCode::InternalError
    }

    fn status(&self) -> StatusCode {
        use ApiErrorCode::*;
        match self {
            MissingFields | UserExists | UnknownUsername | InvalidPassword | InvalidQuantity
            | InvalidAmount | InvalidSignature => StatusCode::BAD_REQUEST,
            MissingToken | ProfileTokenRejected => StatusCode::UNAUTHORIZED,
            InvalidToken => StatusCode::FORBIDDEN,
            ProductNotFound | CartItemNotFound | UserNotFound => StatusCode::NOT_FOUND,
            GatewayFailure | InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingFields => ApiErrorCode::MissingFields,
            AuthError::UserExists => ApiErrorCode::UserExists,
            AuthError::UnknownUsername => ApiErrorCode::UnknownUsername,
            AuthError::InvalidPassword => ApiErrorCode::InvalidPassword,
            AuthError::UserNotFound => ApiErrorCode::UserNotFound,
            AuthError::TokenInvalid | AuthError::TokenExpired => ApiErrorCode::InvalidToken,
            AuthError::Store(e) | AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<CatalogError> for ApiErrorCode {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound => ApiErrorCode::ProductNotFound,
            CatalogError::Store(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<CartError> for ApiErrorCode {
    fn from(error: CartError) -> Self {
        match error {
            CartError::ItemNotFound => ApiErrorCode::CartItemNotFound,
            CartError::InvalidQuantity => ApiErrorCode::InvalidQuantity,
            CartError::Store(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<CheckoutError> for ApiErrorCode {
    fn from(error: CheckoutError) -> Self {
        match error {
            CheckoutError::InvalidAmount => ApiErrorCode::InvalidAmount,
            CheckoutError::InvalidSignature => ApiErrorCode::InvalidSignature,
            CheckoutError::UserNotFound => ApiErrorCode::UserNotFound,
            CheckoutError::Gateway(e) => {
                warn!("gateway error: {}", e);
                ApiErrorCode::GatewayFailure
            }
            CheckoutError::Store(e) => ApiErrorCode::internal(e),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> warp::reply::WithStatus<warp::reply::Json> {
    let json = warp::reply::json(&ErrorBody {
        message: message.into(),
    });
    warp::reply::with_status(json, status)
}

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(code) = err.find::<ApiErrorCode>() {
        return Ok(error_reply(code.status(), code.to_string()));
    }
    if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        return Ok(error_reply(StatusCode::BAD_REQUEST, e.to_string()));
    }
    if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        return Ok(error_reply(StatusCode::BAD_REQUEST, e.to_string()));
    }
    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "Not found"));
    }
    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
        ));
    }

    warn!("unhandled rejection: {:?}", err);
    Ok(error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    ))
}
