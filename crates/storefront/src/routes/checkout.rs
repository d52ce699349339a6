//! Checkout, order hand-off and invoice handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use alraqi_core::checkout::{CheckoutForm, ORDER_PLACED_MESSAGE};
use alraqi_core::handoff::Handoff;
use alraqi_core::{Order, OrderId, PaymentMethod, StoreSettings};
use alraqi_store::OrderRepository;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{PlacedOrders, session_keys};
use crate::routes::cart::{CartView, load_cart, save_cart};
use crate::services::{AuthService, CheckoutService};
use crate::state::AppState;

/// Shown when an order is unknown or was not placed from this session.
pub const ORDER_NOT_FOUND_MESSAGE: &str = "الطلب غير موجود";

/// Checkout page data.
#[derive(Debug, Serialize)]
pub struct CheckoutPage {
    pub form: CheckoutForm,
    pub cart: CartView,
}

/// Checkout form, pre-filled for logged-in customers.
#[instrument(skip(state, session, customer))]
pub async fn form(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
) -> Result<Json<CheckoutPage>> {
    let form = match customer {
        Some(current) => AuthService::new(state.store())
            .customer(&current.id)
            .await
            .map(|c| CheckoutForm::prefilled(&c))
            .unwrap_or_default(),
        None => CheckoutForm::default(),
    };
    let cart = load_cart(&session).await?;

    Ok(Json(CheckoutPage {
        form,
        cart: CartView::from(&cart),
    }))
}

/// Confirmation returned after an order is stored.
#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub message: &'static str,
    pub order: Order,
    pub handoff: Handoff,
}

/// Place the order.
///
/// On success the session cart is emptied and the order is remembered as
/// placed from this session. On any failure the cart is left as it was.
#[instrument(skip(state, session, form))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<Confirmation>)> {
    let mut cart = load_cart(&session).await?;
    // Settings are read before the order is stored
    let snapshot = state.catalog().snapshot(state.store()).await?;

    let order = CheckoutService::new(state.store())
        .place_order(&form, &cart)
        .await?;

    cart.clear();
    save_cart(&session, &cart).await?;
    remember_placed(&session, &order.id).await?;

    add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order.id.as_str())]));

    let handoff = Handoff::for_order(&order, &snapshot.settings);

    Ok((
        StatusCode::CREATED,
        Json(Confirmation {
            message: ORDER_PLACED_MESSAGE,
            order,
            handoff,
        }),
    ))
}

async fn remember_placed(session: &Session, id: &OrderId) -> Result<()> {
    let mut placed: PlacedOrders = session
        .get(session_keys::PLACED_ORDERS)
        .await?
        .unwrap_or_default();
    placed.push(id.clone());
    session.insert(session_keys::PLACED_ORDERS, &placed).await?;
    Ok(())
}

/// Load an order placed from this session.
async fn placed_order(state: &AppState, session: &Session, id: &OrderId) -> Result<Order> {
    let placed: PlacedOrders = session
        .get(session_keys::PLACED_ORDERS)
        .await?
        .unwrap_or_default();
    if !placed.contains(id) {
        return Err(AppError::NotFound(ORDER_NOT_FOUND_MESSAGE.to_string()));
    }

    state
        .store()
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound(ORDER_NOT_FOUND_MESSAGE.to_string()))
}

/// Summary text and deep links for forwarding a placed order.
#[instrument(skip(state, session))]
pub async fn handoff(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
) -> Result<Json<Handoff>> {
    let order = placed_order(&state, &session, &id).await?;
    let snapshot = state.catalog().snapshot(state.store()).await?;
    Ok(Json(Handoff::for_order(&order, &snapshot.settings)))
}

/// Printable invoice.
#[derive(Template, WebTemplate)]
#[template(path = "invoice.html")]
pub struct InvoiceTemplate {
    pub order: Order,
    pub settings: StoreSettings,
    pub bank_transfer: bool,
}

impl InvoiceTemplate {
    #[must_use]
    pub fn new(order: Order, settings: StoreSettings) -> Self {
        Self {
            bank_transfer: order.payment_method == PaymentMethod::BankTransfer,
            order,
            settings,
        }
    }
}

/// Printable invoice for a placed order.
#[instrument(skip(state, session))]
pub async fn invoice(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
) -> Result<InvoiceTemplate> {
    let order = placed_order(&state, &session, &id).await?;
    let snapshot = state.catalog().snapshot(state.store()).await?;
    Ok(InvoiceTemplate::new(order, snapshot.settings.clone()))
}
