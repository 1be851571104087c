use super::error::ApiErrorCode;
use crate::application_port::{
    AddItemInput, AuthService, CartService, CatalogService, CheckoutService, FinalizeOrderInput,
    LoginInput, SignupInput, UserProfile, VerifyPaymentInput,
};
use crate::domain_model::{Identity, LineItem, PriceSort, Product, ProductId, ProductQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

// Response bodies mirror the shapes the storefront client already speaks:
// {jwt_token}, {user}, {product}, {items}, {message}, {status}.

#[derive(Debug, Serialize)]
struct TokenResponse {
    jwt_token: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

// ------------------- auth -------------------

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub number: String,
}

pub async fn signup(
    body: SignupRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let issued = auth_service
        .signup(SignupInput {
            username: body.username,
            password: body.password,
            number: body.number,
        })
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&TokenResponse {
        jwt_token: issued.token.0,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    body: LoginRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let issued = auth_service
        .login(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&TokenResponse {
        jwt_token: issued.token.0,
    }))
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    user: UserProfile,
}

/// Decodes the Authorization header itself instead of going through the
/// shared gate; both missing and invalid tokens are 401 here.
pub async fn profile(
    auth_header: Option<String>,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let header = auth_header.ok_or_else(|| reject::custom(ApiErrorCode::MissingToken))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| reject::custom(ApiErrorCode::ProfileTokenRejected))?;

    let user = auth_service
        .profile(token)
        .await
        .map_err(|e| match e {
            crate::application_port::AuthError::TokenInvalid
            | crate::application_port::AuthError::TokenExpired => {
                ApiErrorCode::ProfileTokenRejected
            }
            other => ApiErrorCode::from(other),
        })
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ProfileResponse { user }))
}

// ------------------- catalog -------------------

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub sort_by: Option<PriceSort>,
    pub category: Option<String>,
    pub title_search: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ProductListResponse {
    product: Vec<Product>,
}

pub async fn list_products(
    query: ProductListQuery,
    _identity: Identity,
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let products = catalog_service
        .list(ProductQuery {
            category: query.category,
            title_search: query.title_search,
            min_rating: query.rating,
            sort_by: query.sort_by,
        })
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ProductListResponse { product: products }))
}

#[derive(Debug, Serialize)]
struct ProductResponse {
    product: Product,
}

pub async fn get_product(
    product_id: String,
    _identity: Identity,
    catalog_service: Arc<dyn CatalogService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let product = catalog_service
        .get(&ProductId(product_id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ProductResponse { product }))
}

// ------------------- cart -------------------

#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub title: String,
    pub price: i64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub quantity: i64,
}

pub async fn add_cart_item(
    body: AddCartItemRequest,
    identity: Identity,
    cart_service: Arc<dyn CartService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    cart_service
        .add(
            &identity.username,
            AddItemInput {
                product_id: ProductId(body.product_id),
                title: body.title,
                price: body.price,
                image_url: body.image_url,
                quantity: body.quantity,
            },
        )
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&MessageResponse {
        message: "Item added to cart",
    }))
}

#[derive(Debug, Serialize)]
struct CartResponse {
    items: Vec<LineItem>,
}

pub async fn get_cart(
    identity: Identity,
    cart_service: Arc<dyn CartService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let items = cart_service
        .items(&identity.username)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&CartResponse { items }))
}

pub async fn remove_cart_item(
    product_id: String,
    identity: Identity,
    cart_service: Arc<dyn CartService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    cart_service
        .remove_item(&identity.username, &ProductId(product_id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&MessageResponse {
        message: "Item removed",
    }))
}

pub async fn clear_cart(
    identity: Identity,
    cart_service: Arc<dyn CartService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    cart_service
        .clear(&identity.username)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&MessageResponse {
        message: "All cart items removed",
    }))
}

pub async fn increment_cart_item(
    product_id: String,
    identity: Identity,
    cart_service: Arc<dyn CartService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    cart_service
        .increment(&identity.username, &ProductId(product_id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&MessageResponse {
        message: "Quantity increased",
    }))
}

pub async fn decrement_cart_item(
    product_id: String,
    identity: Identity,
    cart_service: Arc<dyn CartService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    cart_service
        .decrement(&identity.username, &ProductId(product_id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&MessageResponse {
        message: "Quantity decreased",
    }))
}

// ------------------- checkout -------------------

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: i64,
}

pub async fn create_order(
    body: CreateOrderRequest,
    _identity: Identity,
    checkout_service: Arc<dyn CheckoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let intent = checkout_service
        .create_intent(body.amount)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    // The gateway's intent goes back verbatim; the client hands its id to
    // the payment widget.
    Ok(warp::reply::json(&intent))
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(rename = "gatewayOrderId")]
    pub gateway_order_id: String,
    #[serde(rename = "gatewayPaymentId")]
    pub gateway_payment_id: String,
    pub signature: String,
}

pub async fn verify_payment(
    body: VerifyPaymentRequest,
    _identity: Identity,
    checkout_service: Arc<dyn CheckoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    checkout_service
        .verify_payment(VerifyPaymentInput {
            gateway_order_id: body.gateway_order_id,
            gateway_payment_id: body.gateway_payment_id,
            signature: body.signature,
        })
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&MessageResponse {
        message: "Payment verified successfully",
    }))
}

#[derive(Debug, Deserialize)]
pub struct SaveOrderRequest {
    #[serde(rename = "gatewayOrderId")]
    pub gateway_order_id: String,
    #[serde(rename = "gatewayPaymentId")]
    pub gateway_payment_id: String,
    pub signature: String,
    #[serde(rename = "cartList")]
    pub cart_list: Vec<LineItem>,
    #[serde(rename = "totalAmount")]
    pub total_amount: i64,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

pub async fn save_order(
    body: SaveOrderRequest,
    identity: Identity,
    checkout_service: Arc<dyn CheckoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    checkout_service
        .finalize(
            &identity.username,
            FinalizeOrderInput {
                gateway_order_id: body.gateway_order_id,
                gateway_payment_id: body.gateway_payment_id,
                signature: body.signature,
                items: body.cart_list,
                total_amount: body.total_amount,
            },
        )
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&StatusResponse { status: "success" }))
}

pub async fn list_orders(
    identity: Identity,
    checkout_service: Arc<dyn CheckoutService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let orders = checkout_service
        .orders_for(&identity.username)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&orders))
}
