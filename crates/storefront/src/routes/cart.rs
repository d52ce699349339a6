//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation returns the full
//! cart so the client can redraw the drawer without a second request.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use alraqi_core::cart::Cart;
use alraqi_core::{CartItem, Price, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::routes::catalog::PRODUCT_NOT_FOUND_MESSAGE;
use crate::state::AppState;

/// Cart as returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub subtotal: Price,
    /// Set after an add so the client slides the drawer open.
    pub cart_open: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self::new(cart, false)
    }
}

impl CartView {
    fn new(cart: &Cart, cart_open: bool) -> Self {
        Self {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            cart_open,
        }
    }
}

/// Read the session cart; a fresh session has an empty one.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the session cart.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Current cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add-to-cart form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: ProductId,
    #[serde(default)]
    pub selected_size: Option<String>,
}

/// Add one unit of a product.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCart>,
) -> Result<Json<CartView>> {
    let snapshot = state.catalog().snapshot(state.store()).await?;
    let product = snapshot
        .product(&form.product_id)
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND_MESSAGE.to_string()))?;

    let mut cart = load_cart(&session).await?;
    cart.add(product, form.selected_size)?;
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", form.product_id.as_str())]),
    );
    Ok(Json(CartView::new(&cart, true)))
}

/// Quantity change form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantity {
    pub product_id: ProductId,
    #[serde(default)]
    pub selected_size: Option<String>,
    pub delta: i64,
}

/// Step a line's quantity up or down; it never drops below 1.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(form): Json<UpdateQuantity>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if cart.update_quantity(&form.product_id, form.selected_size.as_deref(), form.delta) {
        save_cart(&session, &cart).await?;
    }
    Ok(Json(CartView::from(&cart)))
}

/// Remove-from-cart form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCart {
    pub product_id: ProductId,
}

/// Drop every line for a product.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(form): Json<RemoveFromCart>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if cart.remove(&form.product_id) {
        save_cart(&session, &cart).await?;
    }
    Ok(Json(CartView::from(&cart)))
}
