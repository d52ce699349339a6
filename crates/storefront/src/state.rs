//! Application state shared across handlers.

use std::sync::Arc;

use alraqi_store::{SharedStore, Store};

use crate::config::StorefrontConfig;
use crate::services::CatalogCache;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the store, the catalog cache and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: SharedStore,
    catalog: CatalogCache,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog cache starts empty; call
    /// [`CatalogCache::spawn_invalidator`] to keep it in step with the store.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: SharedStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog: CatalogCache::default(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backing store.
    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    /// Get a reference to the catalog cache.
    #[must_use]
    pub fn catalog(&self) -> &CatalogCache {
        &self.inner.catalog
    }
}
