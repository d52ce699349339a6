//! Checkout service.
//!
//! Validates the session cart and form, assigns an order id, and writes the
//! order. The caller clears the cart only after this returns `Ok`.

use chrono::Utc;
use tracing::instrument;

use alraqi_core::checkout::{self, CheckoutError, CheckoutForm};
use alraqi_core::{Order, cart::Cart};
use alraqi_store::{OrderRepository, RepositoryError, Store};

/// Why a checkout did not produce an order.
#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    /// Rejected before anything was written.
    #[error(transparent)]
    Invalid(#[from] CheckoutError),
    /// The order could not be stored.
    #[error("failed to store order: {0}")]
    Store(#[from] RepositoryError),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    store: &'a dyn Store,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Place an order for `cart`.
    ///
    /// # Errors
    ///
    /// Returns `PlaceOrderError::Invalid` when validation fails and
    /// `PlaceOrderError::Store` when the write fails. Nothing is stored in
    /// either case.
    #[instrument(skip(self, form, cart), fields(lines = cart.items().len()))]
    pub async fn place_order(
        &self,
        form: &CheckoutForm,
        cart: &Cart,
    ) -> Result<Order, PlaceOrderError> {
        let validated = checkout::validate(form, cart)?;

        let id = self.store.next_order_id();
        let order = validated.into_order(id, cart, Utc::now());
        self.store.insert_order(&order).await?;

        tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alraqi_core::{OrderStatus, Price, Product, defaults};
    use alraqi_store::{CatalogRepository, MemoryStore};

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Ali".to_string(),
            phone: "0912345678".to_string(),
            address: "Khartoum".to_string(),
            accept_terms: true,
            ..CheckoutForm::default()
        }
    }

    fn chicken() -> Product {
        defaults::initial_products().remove(0)
    }

    #[tokio::test]
    async fn test_order_total_and_status() {
        let store = MemoryStore::seeded();
        let mut cart = Cart::new();
        let product = chicken();
        cart.add(&product, None).unwrap();
        cart.add(&product, None).unwrap();

        let placed = CheckoutService::new(&store)
            .place_order(&form(), &cart)
            .await
            .unwrap();

        assert_eq!(placed.total, Price::new(product.price.amount() * 2));
        assert_eq!(placed.status, OrderStatus::Pending);
        assert_eq!(placed.id.as_str().len(), 20);
        assert_eq!(store.list_orders().await.unwrap(), vec![placed]);
    }

    #[tokio::test]
    async fn test_rejected_checkout_writes_nothing() {
        let store = MemoryStore::seeded();
        let mut cart = Cart::new();
        cart.add(&chicken(), None).unwrap();

        let mut blank = form();
        blank.address = "   ".to_string();
        let err = CheckoutService::new(&store)
            .place_order(&blank, &cart)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PlaceOrderError::Invalid(CheckoutError::MissingFields(_))
        ));
        assert!(store.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_keeps_price_after_product_edit() {
        let store = MemoryStore::seeded();
        let mut product = chicken();
        let mut cart = Cart::new();
        cart.add(&product, None).unwrap();

        let placed = CheckoutService::new(&store)
            .place_order(&form(), &cart)
            .await
            .unwrap();

        product.price = Price::new(1);
        store.upsert_product(&product).await.unwrap();

        let stored = store.get_order(&placed.id).await.unwrap().unwrap();
        assert_eq!(stored.items[0].unit_price(), placed.items[0].unit_price());
        assert_ne!(stored.items[0].unit_price(), Price::new(1));
    }
}
