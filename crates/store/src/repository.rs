//! Repository traits.
//!
//! One trait per collection plus [`ChangeFeed`]; [`Store`] bundles them.
//! Handlers hold a [`SharedStore`] and never see which backend is behind it.
//!
//! Writes are last-writer-wins. Collections that the back-office saves as
//! a whole (categories, settings) are replaced wholesale.

use std::sync::Arc;

use async_trait::async_trait;

use alraqi_core::{
    Category, Customer, CustomerId, Email, Order, OrderId, OrderStatus, Product, ProductId, Review,
    StoreSettings,
};

use crate::error::RepositoryError;
use crate::events::ChangeSubscription;

/// Products, their reviews, and the category list.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All products in catalog order, reviews attached.
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;

    /// A single product with its reviews.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Create or overwrite a product.
    ///
    /// Existing reviews are kept; `product.reviews` is ignored. New products
    /// go to the end of the catalog, edited ones keep their place.
    async fn upsert_product(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Delete a product and its reviews.
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    async fn delete_product(&self, id: &ProductId) -> Result<(), RepositoryError>;

    /// Append a review to a product.
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    async fn add_review(&self, product_id: &ProductId, review: &Review)
    -> Result<(), RepositoryError>;

    /// The category list in display order.
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Replace the whole category list.
    async fn replace_categories(&self, categories: &[Category]) -> Result<(), RepositoryError>;
}

/// Placed orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Allocate a fresh, time-ordered order key.
    fn next_order_id(&self) -> OrderId;

    /// Store a new order.
    ///
    /// Returns `RepositoryError::Conflict` if the id is already used.
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError>;

    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    async fn get_order(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Set an order's status and return the updated order.
    ///
    /// Any status may be set from any other.
    async fn set_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError>;

    /// Orders placed with exactly this phone number, newest first.
    async fn orders_by_phone(&self, phone: &str) -> Result<Vec<Order>, RepositoryError>;
}

/// Store settings and the back-office password.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// The saved settings, if any have been saved.
    async fn get_settings(&self) -> Result<Option<StoreSettings>, RepositoryError>;

    /// Overwrite the settings document.
    async fn save_settings(&self, settings: &StoreSettings) -> Result<(), RepositoryError>;

    /// Argon2 hash of the back-office password.
    async fn admin_password_hash(&self) -> Result<Option<String>, RepositoryError>;

    async fn set_admin_password_hash(&self, hash: &str) -> Result<(), RepositoryError>;
}

/// Customer accounts.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Create an account.
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    async fn create_customer(
        &self,
        customer: &Customer,
        password_hash: &str,
    ) -> Result<(), RepositoryError>;

    /// Look up an account and its password hash by email.
    async fn find_customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Customer, String)>, RepositoryError>;

    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Save profile edits.
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id and
    /// `RepositoryError::Conflict` if the new email belongs to someone else.
    async fn update_customer(&self, customer: &Customer) -> Result<(), RepositoryError>;
}

/// Source of change events.
pub trait ChangeFeed: Send + Sync {
    /// Subscribe to events for writes made after this call.
    fn subscribe(&self) -> ChangeSubscription;
}

/// A complete store backend.
#[async_trait]
pub trait Store:
    CatalogRepository + OrderRepository + SettingsRepository + CustomerRepository + ChangeFeed
{
    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Store handle shared across handlers.
pub type SharedStore = Arc<dyn Store>;
