//! Store wrapper for exercising failure and timing paths in tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use alraqi_core::{
    Category, Customer, CustomerId, Email, Order, OrderId, OrderStatus, Product, ProductId, Review,
    StoreSettings,
};
use alraqi_store::{
    CatalogRepository, ChangeFeed, ChangeSubscription, CustomerRepository, MemoryStore,
    OrderRepository, RepositoryError, SettingsRepository, Store,
};

/// A [`MemoryStore`] whose catalog reads can be paused or made to fail.
#[derive(Default)]
pub struct GatedStore {
    inner: MemoryStore,
    gated: AtomicBool,
    failing: AtomicBool,
    listed: Notify,
    release: Notify,
}

impl GatedStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub const fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Pause the next `list_products` after it has read the products.
    pub fn gate_next_product_list(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    /// Wait until a gated `list_products` has read and paused.
    pub async fn wait_for_product_list(&self) {
        self.listed.notified().await;
    }

    pub fn release_product_list(&self) {
        self.release.notify_one();
    }

    /// Make catalog and settings reads fail.
    pub fn fail_catalog_reads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::DataCorruption(
                "catalog unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for GatedStore {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        self.check_reads()?;
        let products = self.inner.list_products().await?;
        if self.gated.swap(false, Ordering::SeqCst) {
            self.listed.notify_one();
            self.release.notified().await;
        }
        Ok(products)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.check_reads()?;
        self.inner.get_product(id).await
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), RepositoryError> {
        self.inner.upsert_product(product).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), RepositoryError> {
        self.inner.delete_product(id).await
    }

    async fn add_review(
        &self,
        product_id: &ProductId,
        review: &Review,
    ) -> Result<(), RepositoryError> {
        self.inner.add_review(product_id, review).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        self.check_reads()?;
        self.inner.list_categories().await
    }

    async fn replace_categories(&self, categories: &[Category]) -> Result<(), RepositoryError> {
        self.inner.replace_categories(categories).await
    }
}

#[async_trait]
impl OrderRepository for GatedStore {
    fn next_order_id(&self) -> OrderId {
        self.inner.next_order_id()
    }

    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        self.inner.insert_order(order).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        self.inner.list_orders().await
    }

    async fn get_order(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        self.inner.get_order(id).await
    }

    async fn set_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        self.inner.set_order_status(id, status).await
    }

    async fn orders_by_phone(&self, phone: &str) -> Result<Vec<Order>, RepositoryError> {
        self.inner.orders_by_phone(phone).await
    }
}

#[async_trait]
impl SettingsRepository for GatedStore {
    async fn get_settings(&self) -> Result<Option<StoreSettings>, RepositoryError> {
        self.check_reads()?;
        self.inner.get_settings().await
    }

    async fn save_settings(&self, settings: &StoreSettings) -> Result<(), RepositoryError> {
        self.inner.save_settings(settings).await
    }

    async fn admin_password_hash(&self) -> Result<Option<String>, RepositoryError> {
        self.inner.admin_password_hash().await
    }

    async fn set_admin_password_hash(&self, hash: &str) -> Result<(), RepositoryError> {
        self.inner.set_admin_password_hash(hash).await
    }
}

#[async_trait]
impl CustomerRepository for GatedStore {
    async fn create_customer(
        &self,
        customer: &Customer,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        self.inner.create_customer(customer, password_hash).await
    }

    async fn find_customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Customer, String)>, RepositoryError> {
        self.inner.find_customer_by_email(email).await
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.inner.get_customer(id).await
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
        self.inner.update_customer(customer).await
    }
}

impl ChangeFeed for GatedStore {
    fn subscribe(&self) -> ChangeSubscription {
        self.inner.subscribe()
    }
}

#[async_trait]
impl Store for GatedStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.inner.ping().await
    }
}
