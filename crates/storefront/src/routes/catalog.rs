//! Catalog route handlers: settings, categories, products and reviews.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use alraqi_core::catalog::{self, CategoryFilter};
use alraqi_core::{Category, Product, ProductId, Review, StoreSettings};
use alraqi_store::{CatalogRepository, RepositoryError};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Shown after a review is saved.
pub const REVIEW_ADDED_MESSAGE: &str =
    "شكراً لك! تم إضافة تقييمك بنجاح وسوف يظهر للجميع قريباً.";

/// Shown for an unknown product id.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "المنتج غير موجود";

/// Product as listed: the record plus derived badges.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub has_offer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            product: product.clone(),
            has_offer: product.has_offer(),
            discount_percent: product.discount_percent(),
            average_rating: product.average_rating(),
        }
    }
}

/// Listing filters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
}

/// Store branding and contact details.
#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Result<Json<StoreSettings>> {
    let snapshot = state.catalog().snapshot(state.store()).await?;
    Ok(Json(snapshot.settings.clone()))
}

/// Category names in display order.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let snapshot = state.catalog().snapshot(state.store()).await?;
    Ok(Json(snapshot.categories.clone()))
}

/// Products matching the text query and category, in catalog order.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let snapshot = state.catalog().snapshot(state.store()).await?;
    let filter = CategoryFilter::parse(query.category.as_deref());

    let products = catalog::filter_products(&snapshot.products, &query.q, &filter)
        .into_iter()
        .map(ProductView::from)
        .collect();
    Ok(Json(products))
}

/// A single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>> {
    let snapshot = state.catalog().snapshot(state.store()).await?;
    snapshot
        .product(&id)
        .map(|p| Json(ProductView::from(p)))
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND_MESSAGE.to_string()))
}

/// Review form.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Add a review as the logged-in customer.
///
/// The review is signed with the customer's display name and shows up in
/// listings once the catalog cache refreshes.
#[instrument(skip(state, customer, form), fields(customer_id = %customer.id))]
pub async fn add_review(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<ProductId>,
    Json(form): Json<ReviewForm>,
) -> Result<(StatusCode, Json<Value>)> {
    let review = Review::new(&customer.name, form.rating, &form.comment)?;

    state
        .store()
        .add_review(&id, &review)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(PRODUCT_NOT_FOUND_MESSAGE.to_string()),
            other => AppError::Store(other),
        })?;

    add_breadcrumb("review", "Review added", Some(&[("product_id", id.as_str())]));
    tracing::info!(product_id = %id, rating = review.rating, "Review added");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": REVIEW_ADDED_MESSAGE, "review": review })),
    ))
}
