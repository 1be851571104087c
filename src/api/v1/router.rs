use super::error::*;
use super::handler;
use super::handler::ProductListQuery;
use crate::application_port::AuthService;
use crate::domain_model::Identity;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let signup = warp::post()
        .and(warp::path("signup"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::signup);

    let login = warp::post()
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    // Hand-decoded header, not the shared gate.
    let profile = warp::get()
        .and(warp::path("profile"))
        .and(warp::path::end())
        .and(warp::header::optional::<String>("authorization"))
        .and(with(server.auth_service.clone()))
        .and_then(handler::profile);

    let list_products = warp::get()
        .and(warp::path("products"))
        .and(warp::path::end())
        .and(warp::query::<ProductListQuery>())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.catalog_service.clone()))
        .and_then(handler::list_products);

    let get_product = warp::get()
        .and(warp::path("products"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.catalog_service.clone()))
        .and_then(handler::get_product);

    let add_cart_item = warp::post()
        .and(warp::path("cart"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.cart_service.clone()))
        .and_then(handler::add_cart_item);

    let get_cart = warp::get()
        .and(warp::path("cart"))
        .and(warp::path::end())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.cart_service.clone()))
        .and_then(handler::get_cart);

    let clear_cart = warp::delete()
        .and(warp::path("cart"))
        .and(warp::path::end())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.cart_service.clone()))
        .and_then(handler::clear_cart);

    let remove_cart_item = warp::delete()
        .and(warp::path("cart"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.cart_service.clone()))
        .and_then(handler::remove_cart_item);

    let increment_cart_item = warp::put()
        .and(warp::path("cart"))
        .and(warp::path("increment"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.cart_service.clone()))
        .and_then(handler::increment_cart_item);

    let decrement_cart_item = warp::put()
        .and(warp::path("cart"))
        .and(warp::path("decrement"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.cart_service.clone()))
        .and_then(handler::decrement_cart_item);

    let create_order = warp::post()
        .and(warp::path("create-order"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.checkout_service.clone()))
        .and_then(handler::create_order);

    let verify_payment = warp::post()
        .and(warp::path("verify-payment"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.checkout_service.clone()))
        .and_then(handler::verify_payment);

    let save_order = warp::post()
        .and(warp::path("save-order"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.checkout_service.clone()))
        .and_then(handler::save_order);

    let list_orders = warp::get()
        .and(warp::path("orders"))
        .and(warp::path::end())
        .and(with_identity(server.auth_service.clone()))
        .and(with(server.checkout_service.clone()))
        .and_then(handler::list_orders);

    signup
        .or(login)
        .or(profile)
        .or(list_products)
        .or(get_product)
        .or(add_cart_item)
        .or(get_cart)
        .or(clear_cart)
        .or(increment_cart_item)
        .or(decrement_cart_item)
        .or(remove_cart_item)
        .or(create_order)
        .or(verify_payment)
        .or(save_order)
        .or(list_orders)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// The auth gate: 401 without a token, 403 when the token does not
/// verify; on success the decoded identity flows into the handler.
fn with_identity(
    auth_service: Arc<dyn AuthService>,
) -> impl Filter<Extract = (Identity,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(move |header: Option<String>| {
        let auth_service = auth_service.clone();
        async move {
            let header = header.ok_or_else(|| reject::custom(ApiErrorCode::MissingToken))?;
            let token = header
                .strip_prefix("Bearer ")
                .ok_or_else(|| reject::custom(ApiErrorCode::InvalidToken))?;

            auth_service
                .verify_token(token)
                .await
                .map_err(ApiErrorCode::from)
                .map_err(reject::custom)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_port::SignupInput;
    use crate::domain::expected_signature;
    use crate::server::DEV_GATEWAY_SECRET;
    use crate::settings::{Auth, Gateway, Http, Log, Settings, Storage};
    use serde_json::{Value, json};

    async fn memory_server() -> Arc<Server> {
        let settings = Settings {
            auth: Auth { token_ttl_days: 30 },
            gateway: Gateway {
                backend: "static".to_string(),
                endpoint: String::new(),
                currency: "INR".to_string(),
            },
            http: Http {
                address: "127.0.0.1:0".to_string(),
            },
            log: Log {
                filter: "info".to_string(),
            },
            storage: Storage {
                backend: "memory".to_string(),
            },
        };
        Arc::new(Server::try_new(&settings).await.unwrap())
    }

    async fn token_for(server: &Server, username: &str) -> String {
        let issued = server
            .auth_service
            .signup(SignupInput {
                username: username.to_string(),
                password: "hunter2!".to_string(),
                number: "555".to_string(),
            })
            .await
            .unwrap();
        issued.token.0
    }

    #[tokio::test]
    async fn cart_requires_a_token() {
        let api = routes(memory_server().await).recover(recover_error);

        let res = warp::test::request()
            .method("GET")
            .path("/cart")
            .reply(&api)
            .await;
        assert_eq!(res.status(), 401);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["message"], "No token provided");

        let res = warp::test::request()
            .method("GET")
            .path("/cart")
            .header("authorization", "Bearer not-a-real-token")
            .reply(&api)
            .await;
        assert_eq!(res.status(), 403);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["message"], "Invalid token");
    }

    #[tokio::test]
    async fn duplicate_signup_is_a_400() {
        let api = routes(memory_server().await).recover(recover_error);

        let res = warp::test::request()
            .method("POST")
            .path("/signup")
            .json(&json!({"username": "alice", "password": "hunter2!", "number": "555"}))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200, "{:?}", res.body());
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert!(body["jwt_token"].is_string());

        let res = warp::test::request()
            .method("POST")
            .path("/signup")
            .json(&json!({"username": "alice", "password": "other", "number": "556"}))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 400);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["message"], "User already exists");
    }

    #[tokio::test]
    async fn login_wrong_password_is_a_400() {
        let server = memory_server().await;
        token_for(&server, "alice").await;
        let api = routes(server).recover(recover_error);

        let res = warp::test::request()
            .method("POST")
            .path("/login")
            .json(&json!({"username": "alice", "password": "wrong"}))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 400);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["message"], "Invalid password");
    }

    #[tokio::test]
    async fn profile_round_trip() {
        let server = memory_server().await;
        let token = token_for(&server, "alice").await;
        let api = routes(server).recover(recover_error);

        let res = warp::test::request()
            .method("GET")
            .path("/profile")
            .header("authorization", format!("Bearer {}", token))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["user"]["username"], "alice");
        assert!(body["user"].get("password_hash").is_none());

        let res = warp::test::request()
            .method("GET")
            .path("/profile")
            .reply(&api)
            .await;
        assert_eq!(res.status(), 401);
    }

    #[tokio::test]
    async fn unknown_product_is_a_404() {
        let server = memory_server().await;
        let token = token_for(&server, "alice").await;
        let api = routes(server).recover(recover_error);

        let res = warp::test::request()
            .method("GET")
            .path("/products/nope")
            .header("authorization", format!("Bearer {}", token))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 404);

        let res = warp::test::request()
            .method("GET")
            .path("/products?sort_by=PRICE_LOW")
            .header("authorization", format!("Bearer {}", token))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["product"], json!([]));
    }

    #[tokio::test]
    async fn cart_and_checkout_flow() {
        let server = memory_server().await;
        let token = token_for(&server, "alice").await;
        let api = routes(server).recover(recover_error);
        let auth = format!("Bearer {}", token);

        let res = warp::test::request()
            .method("POST")
            .path("/cart")
            .header("authorization", &auth)
            .json(&json!({
                "productId": "P1",
                "title": "Walnut Desk",
                "price": 120,
                "imageUrl": "/uploads/P1.jpg",
                "quantity": 2
            }))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200);

        let res = warp::test::request()
            .method("PUT")
            .path("/cart/increment/P1")
            .header("authorization", &auth)
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200);

        let res = warp::test::request()
            .method("GET")
            .path("/cart")
            .header("authorization", &auth)
            .reply(&api)
            .await;
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["items"][0]["quantity"], 3);

        let res = warp::test::request()
            .method("POST")
            .path("/create-order")
            .header("authorization", &auth)
            .json(&json!({"amount": 360}))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200);
        let intent: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(intent["amount"], 36000);
        let order_id = intent["id"].as_str().unwrap().to_string();

        let signature = expected_signature(DEV_GATEWAY_SECRET.as_bytes(), &order_id, "pay_1").unwrap();
        let res = warp::test::request()
            .method("POST")
            .path("/verify-payment")
            .header("authorization", &auth)
            .json(&json!({
                "gatewayOrderId": order_id,
                "gatewayPaymentId": "pay_1",
                "signature": signature
            }))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200);

        let res = warp::test::request()
            .method("POST")
            .path("/save-order")
            .header("authorization", &auth)
            .json(&json!({
                "gatewayOrderId": order_id,
                "gatewayPaymentId": "pay_1",
                "signature": signature,
                "cartList": [{
                    "productId": "P1",
                    "title": "Walnut Desk",
                    "price": 120,
                    "imageUrl": "/uploads/P1.jpg",
                    "quantity": 3
                }],
                "totalAmount": 360
            }))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "success");

        // Finalization empties the cart.
        let res = warp::test::request()
            .method("GET")
            .path("/cart")
            .header("authorization", &auth)
            .reply(&api)
            .await;
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["items"], json!([]));

        let res = warp::test::request()
            .method("GET")
            .path("/orders")
            .header("authorization", &auth)
            .reply(&api)
            .await;
        assert_eq!(res.status(), 200);
        let orders: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(orders.as_array().unwrap().len(), 1);
        assert_eq!(orders[0]["status"], "PAID");
    }

    #[tokio::test]
    async fn forged_signature_is_rejected() {
        let server = memory_server().await;
        let token = token_for(&server, "alice").await;
        let api = routes(server).recover(recover_error);

        let res = warp::test::request()
            .method("POST")
            .path("/verify-payment")
            .header("authorization", format!("Bearer {}", token))
            .json(&json!({
                "gatewayOrderId": "order_1",
                "gatewayPaymentId": "pay_1",
                "signature": "deadbeef"
            }))
            .reply(&api)
            .await;
        assert_eq!(res.status(), 400);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["message"], "Invalid signature");
    }

    #[tokio::test]
    async fn malformed_body_is_a_400() {
        let api = routes(memory_server().await).recover(recover_error);

        let res = warp::test::request()
            .method("POST")
            .path("/signup")
            .body(r#"{"username": 42}"#)
            .header("content-type", "application/json")
            .reply(&api)
            .await;
        assert_eq!(res.status(), 400);
    }
}
