//! Integration tests for Al-Raqi.
//!
//! Each test boots the storefront and the back-office in-process on
//! ephemeral ports, both over one shared in-memory store, and drives them
//! over HTTP with cookie-keeping clients.
//!
//! ```bash
//! cargo test -p alraqi-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use secrecy::SecretString;

use alraqi_admin::config::AdminConfig;
use alraqi_core::defaults::DEFAULT_ADMIN_PASSWORD;
use alraqi_store::{ChangeFeed, MemoryStore, SettingsRepository, SharedStore};
use alraqi_storefront::config::StorefrontConfig;

/// Two running services and one client per service.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub storefront_url: String,
    pub admin_url: String,
    /// Shopper's browser.
    pub shopper: Client,
    /// Back-office browser.
    pub admin: Client,
}

impl TestContext {
    /// Start both services over the starter catalog.
    ///
    /// The admin password is the default one.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::seeded());
        store
            .set_admin_password_hash(
                &alraqi_admin::services::hash_password(DEFAULT_ADMIN_PASSWORD).unwrap(),
            )
            .await
            .unwrap();
        let shared: SharedStore = store.clone();

        let storefront_state = alraqi_storefront::state::AppState::new(
            storefront_config(),
            Arc::clone(&shared),
        );
        let _invalidator = storefront_state
            .catalog()
            .spawn_invalidator(store.subscribe());
        let storefront = alraqi_storefront::app(
            storefront_state,
            alraqi_storefront::middleware::session_layer(
                tower_sessions::MemoryStore::default(),
                false,
            ),
            false,
        );

        let admin = alraqi_admin::app(
            alraqi_admin::state::AppState::new(admin_config(), shared),
            alraqi_admin::middleware::session_layer(tower_sessions::MemoryStore::default(), false),
            false,
        );

        Self {
            store,
            storefront_url: serve(storefront).await,
            admin_url: serve(admin).await,
            shopper: client(),
            admin: client(),
        }
    }

    #[must_use]
    pub fn storefront(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    #[must_use]
    pub fn admin(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// Log the back-office client in with the default password.
    pub async fn admin_login(&self) {
        let resp = self
            .admin
            .post(self.admin("/api/login"))
            .json(&serde_json::json!({ "password": DEFAULT_ADMIN_PASSWORD }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
    }
}

/// Poll `check` until it holds; the storefront cache drops asynchronously.
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..50 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not met within one second");
}

async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

fn storefront_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://unused"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost".to_string(),
        session_secret: SecretString::from("x".repeat(32)),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

fn admin_config() -> AdminConfig {
    AdminConfig {
        database_url: SecretString::from("postgres://unused"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost".to_string(),
        session_secret: SecretString::from("x".repeat(32)),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
        tls: None,
    }
}
