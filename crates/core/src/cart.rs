//! Session cart.
//!
//! Lines merge on (product, selected size): adding the same product in the
//! same size bumps the quantity, a different size starts a new line.
//! Quantities never drop below 1; removing a product drops every line for
//! it regardless of size.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CartItem, Order, Product};
use crate::types::{Price, ProductId};

/// Errors from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested size is not offered for the product.
    #[error("size {size:?} is not available for product {product}")]
    UnknownSize {
        /// Product key.
        product: ProductId,
        /// Requested size.
        size: String,
    },
}

/// An ordered list of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Order::items_total(&self.items)
    }

    /// Add one unit of `product` in `size`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownSize` if the product does not offer `size`.
    pub fn add(&mut self, product: &Product, size: Option<String>) -> Result<(), CartError> {
        if !product.accepts_size(size.as_deref()) {
            return Err(CartError::UnknownSize {
                product: product.id.clone(),
                size: size.unwrap_or_default(),
            });
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches(&product.id, size.as_deref()))
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem::new(product, size));
        }
        Ok(())
    }

    /// Remove every line for `product_id`. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.product.id != product_id);
        self.items.len() != before
    }

    /// Adjust quantity by `delta`, clamping at 1.
    ///
    /// With `size` set only the matching line changes; without it every
    /// line for the product does. Returns whether any line matched.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: Option<&str>,
        delta: i64,
    ) -> bool {
        let mut matched = false;
        for line in self.items.iter_mut().filter(|line| {
            &line.product.id == product_id
                && size.is_none_or(|s| line.selected_size.as_deref() == Some(s))
        }) {
            let next = i64::from(line.quantity).saturating_add(delta).max(1);
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
            matched = true;
        }
        matched
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    fn chicken() -> Product {
        defaults::initial_products().remove(0)
    }

    fn eggs() -> Product {
        defaults::initial_products().remove(1)
    }

    #[test]
    fn test_same_product_and_size_merges() {
        let mut cart = Cart::new();
        cart.add(&chicken(), Some("1 كجم".into())).ok();
        cart.add(&chicken(), Some("1 كجم".into())).ok();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_different_size_is_separate_line() {
        let mut cart = Cart::new();
        cart.add(&chicken(), Some("1 كجم".into())).ok();
        cart.add(&chicken(), Some("2 كجم".into())).ok();
        cart.add(&chicken(), None).ok();

        assert_eq!(cart.items().len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_unknown_size_rejected() {
        let mut cart = Cart::new();
        let err = cart.add(&chicken(), Some("10 كجم".into()));
        assert!(matches!(err, Err(CartError::UnknownSize { .. })));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps_at_one() {
        let mut cart = Cart::new();
        cart.add(&eggs(), None).ok();
        cart.add(&eggs(), None).ok();

        assert!(cart.update_quantity(&eggs().id, None, -5));
        assert_eq!(cart.items()[0].quantity, 1);

        assert!(cart.update_quantity(&eggs().id, None, 3));
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_update_quantity_without_size_touches_all_lines() {
        let mut cart = Cart::new();
        cart.add(&chicken(), Some("1 كجم".into())).ok();
        cart.add(&chicken(), Some("2 كجم".into())).ok();

        cart.update_quantity(&chicken().id, None, 1);
        assert!(cart.items().iter().all(|l| l.quantity == 2));

        cart.update_quantity(&chicken().id, Some("2 كجم"), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].quantity, 3);
    }

    #[test]
    fn test_update_unknown_product_reports_no_match() {
        let mut cart = Cart::new();
        assert!(!cart.update_quantity(&ProductId::new("missing"), None, 1));
    }

    #[test]
    fn test_remove_drops_all_sizes() {
        let mut cart = Cart::new();
        cart.add(&chicken(), Some("1 كجم".into())).ok();
        cart.add(&chicken(), Some("2 كجم".into())).ok();
        cart.add(&eggs(), None).ok();

        assert!(cart.remove(&chicken().id));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product.id, eggs().id);
        assert!(!cart.remove(&chicken().id));
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        cart.add(&chicken(), None).ok();
        cart.add(&chicken(), None).ok();
        cart.add(&eggs(), None).ok();
        assert_eq!(cart.subtotal(), Price::new(4500 * 2 + 3800));
    }
}
