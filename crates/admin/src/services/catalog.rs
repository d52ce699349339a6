//! Product and category edits from the back-office.

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use alraqi_core::{Category, Price, Product, ProductId};
use alraqi_store::{CatalogRepository, RepositoryError, Store};

/// Errors from catalog edits.
#[derive(Debug, Error)]
pub enum CatalogAdminError {
    #[error("product name is required")]
    MissingName,

    #[error("category name is empty")]
    EmptyCategory,

    #[error("category already exists: {0}")]
    DuplicateCategory(String),

    #[error("no categories exist")]
    NoCategories,

    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CatalogAdminError {
    /// Arabic message for the back-office.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingName => "يرجى إدخال اسم المنتج",
            Self::EmptyCategory => "يرجى إدخال اسم القسم",
            Self::DuplicateCategory(_) => "القسم موجود مسبقاً",
            Self::NoCategories => "يرجى إضافة قسم أولاً",
            Self::ProductNotFound(_) => "المنتج غير موجود",
            Self::CategoryNotFound(_) => "القسم غير موجود",
            Self::Repository(_) => "حدث خطأ، يرجى المحاولة لاحقاً",
        }
    }
}

/// Product editor form.
///
/// Reviews are not part of the form; an edit keeps the product's reviews.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: u64,
    /// Zero or absent means no offer.
    pub original_price: Option<u64>,
    /// Empty means the first category in the list.
    pub category: String,
    pub image: String,
    pub stock: u32,
    pub barcode: Option<String>,
    pub sizes: Vec<String>,
}

/// Catalog edits over a store.
pub struct CatalogAdmin<'a> {
    store: &'a dyn Store,
}

impl<'a> CatalogAdmin<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Create a product with a fresh random id.
    ///
    /// # Errors
    ///
    /// Returns `MissingName`, `NoCategories`, or a repository error.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_product(&self, form: ProductForm) -> Result<Product, CatalogAdminError> {
        let product = self
            .build(ProductId::generate(), form, Vec::new())
            .await?;
        self.store.upsert_product(&product).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Overwrite an existing product, keeping its id and reviews.
    ///
    /// # Errors
    ///
    /// Returns `ProductNotFound` if `id` is unknown, plus the create errors.
    #[instrument(skip(self, form), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        form: ProductForm,
    ) -> Result<Product, CatalogAdminError> {
        let existing = self
            .store
            .get_product(id)
            .await?
            .ok_or_else(|| CatalogAdminError::ProductNotFound(id.clone()))?;

        let product = self.build(existing.id, form, existing.reviews).await?;
        self.store.upsert_product(&product).await?;
        tracing::info!("Product updated");
        Ok(product)
    }

    /// Delete a product and its reviews.
    ///
    /// # Errors
    ///
    /// Returns `ProductNotFound` if `id` is unknown.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), CatalogAdminError> {
        match self.store.delete_product(id).await {
            Ok(()) => {
                tracing::info!("Product deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(CatalogAdminError::ProductNotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    /// Append a category; returns the new list.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCategory` or `DuplicateCategory`.
    #[instrument(skip(self))]
    pub async fn add_category(&self, name: &str) -> Result<Vec<Category>, CatalogAdminError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogAdminError::EmptyCategory);
        }

        let mut categories = self.store.list_categories().await?;
        if categories.iter().any(|c| c == name) {
            return Err(CatalogAdminError::DuplicateCategory(name.to_string()));
        }
        categories.push(name.to_string());
        self.store.replace_categories(&categories).await?;
        Ok(categories)
    }

    /// Remove a category from the list; products keep the name.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` if the name is not in the list.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, name: &str) -> Result<Vec<Category>, CatalogAdminError> {
        let mut categories = self.store.list_categories().await?;
        let before = categories.len();
        categories.retain(|c| c != name);
        if categories.len() == before {
            return Err(CatalogAdminError::CategoryNotFound(name.to_string()));
        }
        self.store.replace_categories(&categories).await?;
        Ok(categories)
    }

    async fn build(
        &self,
        id: ProductId,
        form: ProductForm,
        reviews: Vec<alraqi_core::Review>,
    ) -> Result<Product, CatalogAdminError> {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(CatalogAdminError::MissingName);
        }

        let category = match form.category.trim() {
            "" => self
                .store
                .list_categories()
                .await?
                .into_iter()
                .next()
                .ok_or(CatalogAdminError::NoCategories)?,
            given => given.to_string(),
        };

        Ok(Product {
            id,
            name,
            description: form.description,
            price: Price::new(form.price),
            original_price: form.original_price.filter(|p| *p > 0).map(Price::new),
            category,
            image: form.image,
            stock: form.stock,
            barcode: form.barcode.filter(|b| !b.trim().is_empty()),
            sizes: form
                .sizes
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            reviews,
        })
    }
}
