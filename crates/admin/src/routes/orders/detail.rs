//! Order detail and status handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use alraqi_core::{Order, OrderId, OrderStatus};
use alraqi_store::{OrderRepository, RepositoryError};

use super::ORDER_NOT_FOUND_MESSAGE;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Order plus the status the workflow advances to next.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub next_status: Option<OrderStatus>,
}

impl From<Order> for OrderDetail {
    fn from(order: Order) -> Self {
        let next_status = order.status.next();
        Self { order, next_status }
    }
}

#[instrument(skip(state, _admin))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>> {
    state
        .store()
        .get_order(&id)
        .await?
        .map(|order| Json(order.into()))
        .ok_or_else(|| AppError::NotFound(ORDER_NOT_FOUND_MESSAGE.to_string()))
}

/// Set any status; steps may be skipped or reversed.
#[instrument(skip(state, _admin), fields(status = ?update.status))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Order>> {
    match state.store().set_order_status(&id, update.status).await {
        Ok(order) => {
            tracing::info!(order_id = %order.id, status = order.status.label(), "Order status changed");
            Ok(Json(order))
        }
        Err(RepositoryError::NotFound) => {
            Err(AppError::NotFound(ORDER_NOT_FOUND_MESSAGE.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
