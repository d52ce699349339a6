//! In-memory store for tests and local demos.

use async_trait::async_trait;
use tokio::sync::RwLock;

use alraqi_core::{
    Category, Customer, CustomerId, Email, Order, OrderId, OrderStatus, Product, ProductId,
    PushKeyGenerator, Review, StoreSettings, defaults,
};

use crate::error::RepositoryError;
use crate::events::{ChangeSubscription, EventBus, StoreEvent};
use crate::repository::{
    CatalogRepository, ChangeFeed, CustomerRepository, OrderRepository, SettingsRepository, Store,
};

#[derive(Debug, Default)]
struct Data {
    products: Vec<Product>,
    categories: Vec<Category>,
    /// Oldest first.
    orders: Vec<Order>,
    settings: Option<StoreSettings>,
    admin_password_hash: Option<String>,
    customers: Vec<(Customer, String)>,
}

/// A store that lives in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Data>,
    bus: EventBus,
    keys: PushKeyGenerator,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the starter catalog and settings.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            data: RwLock::new(Data {
                products: defaults::initial_products(),
                categories: defaults::initial_categories(),
                settings: Some(defaults::initial_settings()),
                ..Data::default()
            }),
            ..Self::default()
        }
    }

    fn notify(&self, event: StoreEvent) {
        self.bus.publish(event);
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.data.read().await.products.clone())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .data
            .read()
            .await
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), RepositoryError> {
        {
            let mut data = self.data.write().await;
            if let Some(existing) = data.products.iter_mut().find(|p| p.id == product.id) {
                let reviews = std::mem::take(&mut existing.reviews);
                *existing = Product {
                    reviews,
                    ..product.clone()
                };
            } else {
                data.products.push(Product {
                    reviews: Vec::new(),
                    ..product.clone()
                });
            }
        }
        self.notify(StoreEvent::Products);
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), RepositoryError> {
        {
            let mut data = self.data.write().await;
            let before = data.products.len();
            data.products.retain(|p| &p.id != id);
            if data.products.len() == before {
                return Err(RepositoryError::NotFound);
            }
        }
        self.notify(StoreEvent::Products);
        Ok(())
    }

    async fn add_review(
        &self,
        product_id: &ProductId,
        review: &Review,
    ) -> Result<(), RepositoryError> {
        {
            let mut data = self.data.write().await;
            let product = data
                .products
                .iter_mut()
                .find(|p| &p.id == product_id)
                .ok_or(RepositoryError::NotFound)?;
            product.reviews.push(review.clone());
        }
        self.notify(StoreEvent::Products);
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.data.read().await.categories.clone())
    }

    async fn replace_categories(&self, categories: &[Category]) -> Result<(), RepositoryError> {
        self.data.write().await.categories = categories.to_vec();
        self.notify(StoreEvent::Categories);
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    fn next_order_id(&self) -> OrderId {
        OrderId::new(self.keys.generate())
    }

    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        {
            let mut data = self.data.write().await;
            if data.orders.iter().any(|o| o.id == order.id) {
                return Err(RepositoryError::Conflict("order id already exists".to_owned()));
            }
            data.orders.push(order.clone());
        }
        self.notify(StoreEvent::Orders);
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.data.read().await.orders.iter().rev().cloned().collect())
    }

    async fn get_order(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self
            .data
            .read()
            .await
            .orders
            .iter()
            .find(|o| &o.id == id)
            .cloned())
    }

    async fn set_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let updated = {
            let mut data = self.data.write().await;
            let order = data
                .orders
                .iter_mut()
                .find(|o| &o.id == id)
                .ok_or(RepositoryError::NotFound)?;
            order.status = status;
            order.clone()
        };
        self.notify(StoreEvent::Orders);
        Ok(updated)
    }

    async fn orders_by_phone(&self, phone: &str) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .data
            .read()
            .await
            .orders
            .iter()
            .rev()
            .filter(|o| o.phone == phone)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn get_settings(&self) -> Result<Option<StoreSettings>, RepositoryError> {
        Ok(self.data.read().await.settings.clone())
    }

    async fn save_settings(&self, settings: &StoreSettings) -> Result<(), RepositoryError> {
        self.data.write().await.settings = Some(settings.clone());
        self.notify(StoreEvent::Settings);
        Ok(())
    }

    async fn admin_password_hash(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.data.read().await.admin_password_hash.clone())
    }

    async fn set_admin_password_hash(&self, hash: &str) -> Result<(), RepositoryError> {
        self.data.write().await.admin_password_hash = Some(hash.to_owned());
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn create_customer(
        &self,
        customer: &Customer,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        {
            let mut data = self.data.write().await;
            if data.customers.iter().any(|(c, _)| c.email == customer.email) {
                return Err(RepositoryError::Conflict("email already exists".to_owned()));
            }
            data.customers
                .push((customer.clone(), password_hash.to_owned()));
        }
        self.notify(StoreEvent::Customers);
        Ok(())
    }

    async fn find_customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Customer, String)>, RepositoryError> {
        Ok(self
            .data
            .read()
            .await
            .customers
            .iter()
            .find(|(c, _)| &c.email == email)
            .cloned())
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self
            .data
            .read()
            .await
            .customers
            .iter()
            .find(|(c, _)| &c.id == id)
            .map(|(c, _)| c.clone()))
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
        {
            let mut data = self.data.write().await;
            if data
                .customers
                .iter()
                .any(|(c, _)| c.email == customer.email && c.id != customer.id)
            {
                return Err(RepositoryError::Conflict("email already exists".to_owned()));
            }
            let (existing, _) = data
                .customers
                .iter_mut()
                .find(|(c, _)| c.id == customer.id)
                .ok_or(RepositoryError::NotFound)?;
            *existing = customer.clone();
        }
        self.notify(StoreEvent::Customers);
        Ok(())
    }
}

impl ChangeFeed for MemoryStore {
    fn subscribe(&self) -> ChangeSubscription {
        self.bus.subscribe()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
