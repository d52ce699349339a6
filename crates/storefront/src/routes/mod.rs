//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness
//! GET  /health/ready                - Store reachable
//!
//! # Catalog
//! GET  /api/settings                - Store branding and contact details
//! GET  /api/categories              - Category names
//! GET  /api/products?q=&category=   - Filtered product list
//! GET  /api/products/{id}           - Product detail
//! POST /api/products/{id}/reviews   - Add review (requires login)
//!
//! # Cart (session)
//! GET  /api/cart                    - Current cart
//! POST /api/cart/add                - Add one unit (cartOpen = true)
//! POST /api/cart/update             - Step quantity, clamped at 1
//! POST /api/cart/remove             - Drop a product
//!
//! # Checkout
//! GET  /api/checkout                - Pre-filled form and cart
//! POST /api/checkout                - Place order
//! GET  /api/orders/{id}/handoff     - Summary and deep links (own orders)
//! GET  /orders/{id}/invoice         - Printable invoice (own orders)
//!
//! # Delivery location (session)
//! GET  /api/location
//! PUT  /api/location
//!
//! # Auth (rate limited)
//! POST /api/auth/register
//! POST /api/auth/login
//! POST /api/auth/logout
//!
//! # Account (requires login)
//! GET  /api/account                 - Profile
//! PUT  /api/account                 - Update profile
//! GET  /api/account/orders          - Orders by the customer's phone
//! GET  /api/account/reviews         - Reviews by the customer's name
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod location;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(catalog::settings))
        .route("/categories", get(catalog::categories))
        .route("/products", get(catalog::index))
        .route("/products/{id}", get(catalog::show))
}

/// Routes that change shared or session state.
pub fn shopping_routes() -> Router<AppState> {
    Router::new()
        .route("/products/{id}/reviews", post(catalog::add_review))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/checkout", get(checkout::form).post(checkout::place))
        .route("/orders/{id}/handoff", get(checkout::handoff))
        .route("/location", get(location::show).put(location::update))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show).put(account::update))
        .route("/orders", get(account::orders))
        .route("/reviews", get(account::reviews))
}

/// Create all routes for the storefront.
///
/// Rate limiting keys on proxy headers; pass `rate_limited = false` when
/// serving without a proxy in front (tests, local runs).
pub fn routes(rate_limited: bool) -> Router<AppState> {
    let mut auth = auth_routes();
    let mut shopping = shopping_routes();
    if rate_limited {
        auth = auth.layer(auth_rate_limiter());
        shopping = shopping.layer(api_rate_limiter());
    }

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", catalog_routes().merge(shopping))
        .nest("/api/auth", auth)
        .nest("/api/account", account_routes())
        .route("/orders/{id}/invoice", get(checkout::invoice))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use secrecy::SecretString;
    use serde_json::Value;
    use tower::ServiceExt;

    use alraqi_core::catalog::OFFERS_CATEGORY;
    use alraqi_store::{MemoryStore, OrderRepository, SharedStore};

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::middleware::session_layer;
    use crate::testing::GatedStore;

    fn app() -> Router {
        app_over(Arc::new(MemoryStore::seeded())).0
    }

    fn app_over(store: SharedStore) -> (Router, AppState) {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/alraqi"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };
        let state = AppState::new(config, store);
        let app = crate::app(
            state.clone(),
            session_layer(tower_sessions::MemoryStore::default(), false),
            false,
        );
        (app, state)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let (status, _) = send(get_req("/health/ready")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_offers_filter() {
        let uri = format!(
            "/api/products?category={}",
            urlencoding::encode(OFFERS_CATEGORY)
        );
        let (status, body) = send(get_req(&uri)).await;
        assert_eq!(status, StatusCode::OK);

        let products = body.as_array().unwrap();
        assert!(!products.is_empty());
        assert!(products.iter().all(|p| p["hasOffer"] == Value::Bool(true)));
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let (status, body) = send(get_req("/api/products/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "المنتج غير موجود");
    }

    #[tokio::test]
    async fn test_review_requires_login() {
        let (status, _) = send(post_json(
            "/api/products/1/reviews",
            &serde_json::json!({ "rating": 5, "comment": "ممتاز" }),
        ))
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_terms_checked_before_cart() {
        let form = serde_json::json!({
            "name": "Ali",
            "phone": "0912345678",
            "address": "Khartoum",
            "acceptTerms": false,
        });
        let (status, body) = send(post_json("/api/checkout", &form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            alraqi_core::checkout::TERMS_REQUIRED_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_default_location() {
        let (status, body) = send(get_req("/api/location")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["location"],
            alraqi_core::defaults::DEFAULT_DELIVERY_LOCATION
        );
    }

    #[tokio::test]
    async fn test_failed_settings_read_places_no_order() {
        let store = Arc::new(GatedStore::new(MemoryStore::seeded()));
        let (app, state) = app_over(store.clone());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/cart/add",
                &serde_json::json!({ "productId": "1", "selectedSize": "1 كجم" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        store.fail_catalog_reads(true);
        state.catalog().invalidate().await;

        let form = serde_json::json!({
            "name": "Ali",
            "phone": "0912345678",
            "address": "Khartoum",
            "acceptTerms": true,
        });
        let mut request = post_json("/api/checkout", &form);
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(store.inner().list_orders().await.unwrap().is_empty());

        store.fail_catalog_reads(false);
        let request = Request::get("/api/cart")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let cart: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(cart["itemCount"], 1);
    }
}
