//! Print handlers for order invoices and packing slips.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use alraqi_core::{Order, OrderId, PaymentMethod, StoreSettings, defaults};
use alraqi_store::{OrderRepository, SettingsRepository};

use super::ORDER_NOT_FOUND_MESSAGE;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Query params for print action.
#[derive(Debug, Deserialize)]
pub struct PrintQuery {
    /// Type of document: "invoice" or `packing_slip`.
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
}

/// Invoice print template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/print_invoice.html")]
pub struct OrderInvoiceTemplate {
    pub order: Order,
    pub settings: StoreSettings,
    pub bank_transfer: bool,
    pub printed_at: String,
}

/// Packing slip print template: items and address, no prices.
#[derive(Template, WebTemplate)]
#[template(path = "orders/print_packing_slip.html")]
pub struct OrderPackingSlipTemplate {
    pub order: Order,
    pub settings: StoreSettings,
    pub printed_at: String,
}

fn printed_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Print order invoice or packing slip.
#[instrument(skip(_admin, state))]
pub async fn print(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Query(query): Query<PrintQuery>,
) -> Result<Response> {
    let store = state.store();
    let order = store
        .get_order(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(ORDER_NOT_FOUND_MESSAGE.to_string()))?;
    let settings = store
        .get_settings()
        .await?
        .unwrap_or_else(defaults::initial_settings);

    let response = if query.doc_type.as_deref() == Some("packing_slip") {
        OrderPackingSlipTemplate {
            order,
            settings,
            printed_at: printed_at(),
        }
        .into_response()
    } else {
        OrderInvoiceTemplate {
            bank_transfer: order.payment_method == PaymentMethod::BankTransfer,
            order,
            settings,
            printed_at: printed_at(),
        }
        .into_response()
    };
    Ok(response)
}
