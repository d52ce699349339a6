//! Dashboard route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use alraqi_core::stats::DashboardStats;
use alraqi_store::{CatalogRepository, OrderRepository};

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Revenue, order and stock figures.
#[instrument(skip_all)]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>> {
    let store = state.store();
    let products = store.list_products().await?;
    let orders = store.list_orders().await?;
    Ok(Json(DashboardStats::compute(&products, &orders)))
}
