//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness
//! GET    /health/ready              - Store reachable
//!
//! # Auth (shared password)
//! POST   /api/login                 - Rate limited
//! POST   /api/logout
//! GET    /api/forgot-password       - Contact-the-owner notice
//!
//! # Everything below requires an admin session
//! GET    /api/dashboard             - Revenue, order and stock figures
//! GET    /api/products?q=           - Product list, name search
//! POST   /api/products              - Create (random id)
//! GET    /api/products/{id}
//! PUT    /api/products/{id}         - Overwrite, keeping reviews
//! DELETE /api/products/{id}
//! GET    /api/categories
//! POST   /api/categories            - Append (unique, non-empty)
//! DELETE /api/categories/{name}     - No cascade to products
//! GET    /api/orders?q=             - Newest first, id/phone search
//! GET    /api/orders/{id}
//! PUT    /api/orders/{id}/status    - Any status
//! GET    /orders/{id}/print?type=   - Invoice or packing slip (HTML)
//! GET    /api/settings
//! PUT    /api/settings              - Whole-document overwrite
//! POST   /api/settings/password     - Change admin password
//! GET    /api/events                - Store change feed (SSE)
//! ```

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod events;
pub mod orders;
pub mod products;
pub mod settings;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::middleware::login_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes(rate_limited: bool) -> Router<AppState> {
    let login = Router::new().route("/login", post(auth::login));
    let login = if rate_limited {
        login.layer(login_rate_limiter())
    } else {
        login
    };

    login
        .route("/logout", post(auth::logout))
        .route("/forgot-password", get(auth::forgot_password))
}

/// Back-office JSON API.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route("/categories/{name}", delete(categories::delete))
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/settings", get(settings::show).put(settings::update))
        .route("/settings/password", post(settings::change_password))
        .route("/events", get(events::stream))
}

/// Create all routes for admin.
///
/// The login limiter keys on the peer address; serve with
/// `into_make_service_with_connect_info::<SocketAddr>()` when
/// `rate_limited` is set.
pub fn routes(rate_limited: bool) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", auth_routes(rate_limited).merge(api_routes()))
        .route("/orders/{id}/print", get(orders::print))
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
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use alraqi_core::defaults::DEFAULT_ADMIN_PASSWORD;
    use alraqi_store::{MemoryStore, SettingsRepository};

    use super::*;
    use crate::config::AdminConfig;
    use crate::middleware::session_layer;
    use crate::services::hash_password;

    async fn app() -> Router {
        let config = AdminConfig {
            database_url: SecretString::from("postgres://localhost/alraqi"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        };
        let store = MemoryStore::seeded();
        store
            .set_admin_password_hash(&hash_password(DEFAULT_ADMIN_PASSWORD).unwrap())
            .await
            .unwrap();
        crate::app(
            AppState::new(config, Arc::new(store)),
            session_layer(tower_sessions::MemoryStore::default(), false),
            false,
        )
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(String::from);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cookie, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn json_request(method: &str, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        json_request("GET", uri, &Value::Null, cookie)
    }

    async fn login(app: &Router) -> String {
        let (status, cookie, _) = send(
            app,
            json_request(
                "POST",
                "/api/login",
                &json!({ "password": DEFAULT_ADMIN_PASSWORD }),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        cookie.unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let (status, _, _) = send(&app, get_request("/health/ready", None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_requires_login() {
        let app = app().await;
        let (status, _, _) = send(&app, get_request("/api/dashboard", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let app = app().await;
        let (status, _, body) = send(
            &app,
            json_request("POST", "/api/login", &json!({ "password": "0000" }), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "كلمة المرور غير صحيحة");
    }

    #[tokio::test]
    async fn test_forgot_password_is_public() {
        let app = app().await;
        let (status, _, body) = send(&app, get_request("/api/forgot-password", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("واتساب"));
    }

    #[tokio::test]
    async fn test_dashboard_after_login() {
        let app = app().await;
        let cookie = login(&app).await;

        let (status, _, body) = send(&app, get_request("/api/dashboard", Some(&cookie))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalProducts"], 4);
        assert_eq!(body["totalOrders"], 0);
    }

    #[tokio::test]
    async fn test_product_search_and_create() {
        let app = app().await;
        let cookie = login(&app).await;

        let (_, _, body) = send(&app, get_request("/api/products?q=%D8%B3%D9%83%D8%B1", Some(&cookie))).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _, created) = send(
            &app,
            json_request(
                "POST",
                "/api/products",
                &json!({ "name": "عدس", "price": 1500, "stock": 3 }),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["category"], "دواجن ولحوم طازجة");

        let (_, _, body) = send(&app, get_request("/api/products", Some(&cookie))).await;
        assert_eq!(body.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_order_status_update() {
        let app = app().await;
        let cookie = login(&app).await;

        let (status, _, body) = send(
            &app,
            json_request(
                "PUT",
                "/api/orders/missing/status",
                &json!({ "status": "shipped" }),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], orders::ORDER_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let app = app().await;
        let cookie = login(&app).await;

        let (status, _, _) = send(
            &app,
            json_request("POST", "/api/logout", &Value::Null, Some(&cookie)),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = send(&app, get_request("/api/settings", Some(&cookie))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
