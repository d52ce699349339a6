//! Category list route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use alraqi_core::Category;
use alraqi_store::CatalogRepository;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::services::CatalogAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.store().list_categories().await?))
}

/// Append a category; responds with the whole list.
#[instrument(skip(state, _admin))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<NewCategory>,
) -> Result<(StatusCode, Json<Vec<Category>>)> {
    let categories = CatalogAdmin::new(state.store())
        .add_category(&form.name)
        .await?;
    Ok((StatusCode::CREATED, Json(categories)))
}

/// Remove a category; products keep the name.
#[instrument(skip(state, _admin))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Category>>> {
    let categories = CatalogAdmin::new(state.store())
        .delete_category(&name)
        .await?;
    Ok(Json(categories))
}
