//! `PostgreSQL` store.
//!
//! # Tables
//!
//! - `product`, `review` - Catalog and reviews, ordered by `position`
//! - `category` - Category names, ordered by `position`
//! - `customer_order` - Orders with their items as a JSONB snapshot
//! - `store_settings` - Singleton settings document (JSONB)
//! - `admin_credential` - Singleton back-office password hash
//! - `customer` - Customer accounts
//!
//! Session tables live in the `tower_sessions` and `admin` schemas and are
//! owned by the session stores.
//!
//! Every write sends a `NOTIFY` on [`CHANGES_CHANNEL`] so other processes
//! sharing the database (storefront, back-office) hear about it.

mod catalog;
mod customers;
mod listener;
mod orders;
mod settings;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use alraqi_core::PushKeyGenerator;

use crate::error::RepositoryError;
use crate::events::{ChangeSubscription, EventBus, StoreEvent};
use crate::repository::{ChangeFeed, Store};

/// `LISTEN`/`NOTIFY` channel carrying change events.
pub const CHANGES_CHANNEL: &str = "alraqi_store_changes";

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Store backed by a `PostgreSQL` pool.
pub struct PgStore {
    pool: PgPool,
    bus: Arc<EventBus>,
    keys: PushKeyGenerator,
    /// Tags our own notifications so the listener can skip them.
    instance: Uuid,
}

impl PgStore {
    /// Wrap a pool. Call [`PgStore::spawn_listener`] to receive changes made
    /// by other processes.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            bus: Arc::new(EventBus::default()),
            keys: PushKeyGenerator::new(),
            instance: Uuid::new_v4(),
        }
    }

    /// Start forwarding notifications from other processes to local
    /// subscribers.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the listener connection cannot be opened.
    pub async fn spawn_listener(&self) -> Result<tokio::task::JoinHandle<()>, sqlx::Error> {
        listener::spawn(&self.pool, Arc::clone(&self.bus), self.instance).await
    }

    /// Publish locally, then tell other processes.
    async fn changed(&self, event: StoreEvent) {
        self.bus.publish(event);

        let payload = listener::encode(self.instance, event);
        if let Err(e) = sqlx::query("SELECT pg_notify($1, $2)")
            .bind(CHANGES_CHANNEL)
            .bind(&payload)
            .execute(&self.pool)
            .await
        {
            tracing::warn!(error = %e, event = event.as_str(), "Failed to send change notification");
        }
    }
}

impl std::fmt::Debug for PgStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStore")
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}

impl ChangeFeed for PgStore {
    fn subscribe(&self) -> ChangeSubscription {
        self.bus.subscribe()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
