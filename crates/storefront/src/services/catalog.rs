//! Cached catalog snapshot.
//!
//! Every storefront page reads products, categories and settings. They are
//! cached together in `moka` and dropped wholesale when the store reports a
//! catalog change; the TTL covers a missed notification.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use alraqi_core::{Category, Product, ProductId, StoreSettings, defaults};
use alraqi_store::{CatalogRepository, ChangeSubscription, RepositoryError, SettingsRepository, Store};

/// Everything the catalog pages show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub settings: StoreSettings,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}

/// Single-entry cache over the store's catalog.
///
/// `generation` counts invalidations. A load only stays cached if no
/// invalidation happened while it was reading the store.
#[derive(Clone)]
pub struct CatalogCache {
    cache: Cache<(), Arc<CatalogSnapshot>>,
    generation: Arc<AtomicU64>,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

impl CatalogCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The current snapshot, loading it on a miss.
    ///
    /// Missing settings fall back to the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be read.
    pub async fn snapshot(&self, store: &dyn Store) -> Result<Arc<CatalogSnapshot>, RepositoryError> {
        if let Some(snapshot) = self.cache.get(&()).await {
            debug!("Catalog cache hit");
            return Ok(snapshot);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let snapshot = Arc::new(CatalogSnapshot {
            products: store.list_products().await?,
            categories: store.list_categories().await?,
            settings: store
                .get_settings()
                .await?
                .unwrap_or_else(defaults::initial_settings),
        });
        self.cache.insert((), Arc::clone(&snapshot)).await;

        // An invalidation after this check also runs `invalidate_all` after
        // the insert, so either way the stale entry is gone.
        if self.generation.load(Ordering::SeqCst) == generation {
            debug!(products = snapshot.products.len(), "Catalog cache loaded");
        } else {
            debug!("Catalog changed during load, not caching");
            self.cache.invalidate(&()).await;
        }
        Ok(snapshot)
    }

    /// Drop the cached snapshot, including one still being loaded.
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Invalidate on every catalog change until the store goes away.
    pub fn spawn_invalidator(&self, mut changes: ChangeSubscription) -> tokio::task::JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            while let Some(event) = changes.recv().await {
                if event.affects_catalog() {
                    debug!(event = event.as_str(), "Invalidating catalog cache");
                    cache.invalidate().await;
                }
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alraqi_core::Price;
    use alraqi_store::{ChangeFeed, MemoryStore};

    use super::*;
    use crate::testing::GatedStore;

    #[tokio::test]
    async fn test_snapshot_is_cached_until_invalidated() {
        let store = MemoryStore::seeded();
        let cache = CatalogCache::default();

        let first = cache.snapshot(&store).await.unwrap();
        let mut product = first.products[0].clone();
        product.price = Price::new(1);
        store.upsert_product(&product).await.unwrap();

        // No invalidator running: still the old price
        let cached = cache.snapshot(&store).await.unwrap();
        assert_eq!(cached.products[0].price, first.products[0].price);

        cache.invalidate().await;
        let fresh = cache.snapshot(&store).await.unwrap();
        assert_eq!(fresh.products[0].price, Price::new(1));
    }

    #[tokio::test]
    async fn test_invalidator_follows_store_changes() {
        let store = MemoryStore::seeded();
        let cache = CatalogCache::default();
        let _task = cache.spawn_invalidator(store.subscribe());

        cache.snapshot(&store).await.unwrap();
        store.replace_categories(&["خضروات".to_string()]).await.unwrap();

        let mut categories = Vec::new();
        for _ in 0..50 {
            categories = cache.snapshot(&store).await.unwrap().categories.clone();
            if categories.len() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(categories, vec!["خضروات".to_string()]);
    }

    #[tokio::test]
    async fn test_load_racing_a_write_is_not_cached() {
        let store = Arc::new(GatedStore::new(MemoryStore::seeded()));
        let cache = CatalogCache::default();
        let _task = cache.spawn_invalidator(store.subscribe());

        store.gate_next_product_list();
        let load = tokio::spawn({
            let (store, cache) = (Arc::clone(&store), cache.clone());
            async move { cache.snapshot(store.as_ref()).await }
        });
        store.wait_for_product_list().await;

        let mut product = store.inner().get_product(&ProductId::new("1")).await.unwrap().unwrap();
        let old_price = product.price;
        product.price = Price::new(1);
        store.upsert_product(&product).await.unwrap();
        cache.invalidate().await;

        store.release_product_list();
        let raced = load.await.unwrap().unwrap();
        assert_eq!(raced.product(&product.id).unwrap().price, old_price);

        let fresh = cache.snapshot(store.as_ref()).await.unwrap();
        assert_eq!(fresh.product(&product.id).unwrap().price, Price::new(1));
    }

    #[tokio::test]
    async fn test_missing_settings_use_defaults() {
        let store = MemoryStore::new();
        let snapshot = CatalogCache::default().snapshot(&store).await.unwrap();
        assert_eq!(snapshot.settings, defaults::initial_settings());
    }
}
