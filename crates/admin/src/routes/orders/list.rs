//! Order list handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use alraqi_core::Order;
use alraqi_core::catalog::search_orders;
use alraqi_store::OrderRepository;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Order list query.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderQuery {
    /// Substring of the order id or phone.
    pub q: String,
}

/// Orders newest first, optionally searched by id or phone.
#[instrument(skip(state, _admin))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<Order>>> {
    let orders = state.store().list_orders().await?;
    Ok(Json(
        search_orders(&orders, &query.q)
            .into_iter()
            .cloned()
            .collect(),
    ))
}
