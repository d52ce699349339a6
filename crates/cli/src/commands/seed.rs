//! Seed the catalog, category list and store settings.
//!
//! Without a file the built-in starter data is loaded. A YAML file may hold
//! any of the three sections; missing sections are left untouched:
//!
//! ```yaml
//! categories:
//!   - دواجن ولحوم طازجة
//! products:
//!   - id: "1"
//!     name: كيلو فراخ طازج
//!     description: ...
//!     price: 4500
//!     originalPrice: 5200
//!     category: دواجن ولحوم طازجة
//!     image: https://...
//!     stock: 50
//!     sizes: ["1 كجم", "2 كجم"]
//! settings:
//!   name: الراقي للمواد الغذائية
//!   ...
//! ```
//!
//! If no admin password exists yet, the default one is set and a warning
//! is logged; change it with `alraqi-cli admin set-password`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use alraqi_admin::services::{AdminAuthError, hash_password};
use alraqi_core::{Category, Product, StoreSettings, defaults};
use alraqi_store::{CatalogRepository, PgStore, RepositoryError, SettingsRepository, Store};

use super::{ConnectError, connect};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Hashing failed: {0}")]
    Hash(#[from] AdminAuthError),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Contents of a seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub categories: Option<Vec<Category>>,
    pub products: Option<Vec<Product>>,
    pub settings: Option<StoreSettings>,
}

impl SeedData {
    /// The built-in starter catalog and settings.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            categories: Some(defaults::initial_categories()),
            products: Some(defaults::initial_products()),
            settings: Some(defaults::initial_settings()),
        }
    }

    /// Parse a YAML seed file.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Load seed data into the database.
pub async fn run(file: Option<&Path>) -> Result<(), SeedError> {
    let data = match file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading seed file");
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SeedError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
            SeedData::from_yaml(&content)?
        }
        None => SeedData::starter(),
    };

    let store = PgStore::new(connect().await?);
    apply(&store, &data).await
}

/// Write each present section, then make sure an admin password exists.
pub async fn apply(store: &dyn Store, data: &SeedData) -> Result<(), SeedError> {
    if let Some(categories) = &data.categories {
        store.replace_categories(categories).await?;
        tracing::info!(count = categories.len(), "Categories seeded");
    }

    if let Some(products) = &data.products {
        for product in products {
            store.upsert_product(product).await?;
        }
        tracing::info!(count = products.len(), "Products seeded");
    }

    if let Some(settings) = &data.settings {
        store.save_settings(settings).await?;
        tracing::info!("Settings seeded");
    }

    if store.admin_password_hash().await?.is_none() {
        store
            .set_admin_password_hash(&hash_password(defaults::DEFAULT_ADMIN_PASSWORD)?)
            .await?;
        tracing::warn!(
            "Admin password set to the default; change it with `alraqi-cli admin set-password`"
        );
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alraqi_store::MemoryStore;

    use super::*;

    #[test]
    fn test_partial_yaml() {
        let data = SeedData::from_yaml("categories:\n  - مخبوزات\n  - ألبان\n").unwrap();
        assert_eq!(data.categories.unwrap().len(), 2);
        assert!(data.products.is_none());
        assert!(data.settings.is_none());
    }

    #[test]
    fn test_product_yaml_uses_camel_case() {
        let yaml = r#"
products:
  - id: "9"
    name: عدس
    description: عدس أحمر
    price: 1500
    originalPrice: 1800
    category: بقوليات ومعلبات
    image: https://example.com/lentils.jpg
    stock: 20
"#;
        let products = SeedData::from_yaml(yaml).unwrap().products.unwrap();
        assert_eq!(products[0].price.amount(), 1500);
        assert!(products[0].has_offer());
        assert!(products[0].reviews.is_empty());
    }

    #[tokio::test]
    async fn test_apply_sets_default_password_once() {
        let store = MemoryStore::new();
        apply(&store, &SeedData::starter()).await.unwrap();

        assert_eq!(store.list_products().await.unwrap().len(), 4);
        let first = store.admin_password_hash().await.unwrap().unwrap();

        apply(&store, &SeedData::default()).await.unwrap();
        assert_eq!(store.admin_password_hash().await.unwrap().unwrap(), first);
    }
}
