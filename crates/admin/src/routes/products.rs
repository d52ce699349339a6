//! Product management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use alraqi_core::catalog::search_by_name;
use alraqi_core::{Product, ProductId};
use alraqi_store::CatalogRepository;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::services::{CatalogAdmin, ProductForm};
use crate::state::AppState;

/// Product list query.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    /// Matched against the product name.
    pub q: String,
}

/// All products, optionally searched by name.
#[instrument(skip(state, _admin))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.store().list_products().await?;
    Ok(Json(
        search_by_name(&products, &query.q)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

#[instrument(skip(state, _admin))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .store()
        .get_product(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("المنتج غير موجود".to_string()))
}

#[instrument(skip(state, _admin, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = CatalogAdmin::new(state.store()).create_product(form).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, _admin, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(form): Json<ProductForm>,
) -> Result<Json<Product>> {
    let product = CatalogAdmin::new(state.store())
        .update_product(&id, form)
        .await?;
    Ok(Json(product))
}

#[instrument(skip(state, _admin))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    CatalogAdmin::new(state.store()).delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
