//! Products, reviews and categories.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use alraqi_core::{Category, Price, Product, ProductId, Review, ReviewId};

use super::PgStore;
use crate::error::RepositoryError;
use crate::events::StoreEvent;
use crate::repository::CatalogRepository;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Price,
    original_price: Option<Price>,
    category: String,
    image: String,
    stock: i32,
    barcode: Option<String>,
    sizes: Vec<String>,
}

impl ProductRow {
    fn into_product(self, reviews: Vec<Review>) -> Result<Product, RepositoryError> {
        let stock = u32::try_from(self.stock).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative stock {} for product {}",
                self.stock, self.id
            ))
        })?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            category: self.category,
            image: self.image,
            stock,
            barcode: self.barcode,
            sizes: self.sizes,
            reviews,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: ReviewId,
    product_id: ProductId,
    customer_name: String,
    rating: i16,
    comment: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = u8::try_from(row.rating).map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid rating {} on review {}", row.rating, row.id))
        })?;

        Ok(Self {
            id: row.id,
            customer_name: row.customer_name,
            rating,
            comment: row.comment,
            date: row.created_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, price, original_price, category, image, \
                               stock, barcode, sizes";

const REVIEW_COLUMNS: &str = "id, product_id, customer_name, rating, comment, created_at";

fn stock_param(product: &Product) -> Result<i32, RepositoryError> {
    i32::try_from(product.stock)
        .map_err(|_| RepositoryError::Conflict(format!("stock {} is out of range", product.stock)))
}

// =============================================================================
// Repository
// =============================================================================

#[async_trait]
impl CatalogRepository for PgStore {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY position"
        ))
        .fetch_all(&self.pool)
        .await?;

        let review_rows: Vec<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {REVIEW_COLUMNS} FROM review ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut reviews: HashMap<ProductId, Vec<Review>> = HashMap::new();
        for row in review_rows {
            let product_id = row.product_id.clone();
            reviews.entry(product_id).or_default().push(row.try_into()?);
        }

        rows.into_iter()
            .map(|row| {
                let product_reviews = reviews.remove(&row.id).unwrap_or_default();
                row.into_product(product_reviews)
            })
            .collect()
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let Some(row) = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let reviews = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM review WHERE product_id = $1 ORDER BY created_at, id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<_>, _>>()?;

        row.into_product(reviews).map(Some)
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO product
                (id, name, description, price, original_price, category, image, stock, barcode, sizes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                original_price = EXCLUDED.original_price,
                category = EXCLUDED.category,
                image = EXCLUDED.image,
                stock = EXCLUDED.stock,
                barcode = EXCLUDED.barcode,
                sizes = EXCLUDED.sizes,
                updated_at = NOW()
            ",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.original_price)
        .bind(&product.category)
        .bind(&product.image)
        .bind(stock_param(product)?)
        .bind(&product.barcode)
        .bind(&product.sizes)
        .execute(&self.pool)
        .await?;

        self.changed(StoreEvent::Products).await;
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), RepositoryError> {
        // Reviews go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.changed(StoreEvent::Products).await;
        Ok(())
    }

    async fn add_review(
        &self,
        product_id: &ProductId,
        review: &Review,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO review (id, product_id, customer_name, rating, comment, created_at)
            SELECT $1, id, $3, $4, $5, $6 FROM product WHERE id = $2
            ",
        )
        .bind(&review.id)
        .bind(product_id)
        .bind(&review.customer_name)
        .bind(i16::from(review.rating))
        .bind(&review.comment)
        .bind(review.date)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "review id already exists"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.changed(StoreEvent::Products).await;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let names = sqlx::query_scalar("SELECT name FROM category ORDER BY position")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    async fn replace_categories(&self, categories: &[Category]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM category").execute(&mut *tx).await?;
        sqlx::query(
            r"
            INSERT INTO category (name, position)
            SELECT name, ord::INTEGER FROM UNNEST($1::TEXT[]) WITH ORDINALITY AS t(name, ord)
            ",
        )
        .bind(categories)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "duplicate category name"))?;

        tx.commit().await?;

        self.changed(StoreEvent::Categories).await;
        Ok(())
    }
}
