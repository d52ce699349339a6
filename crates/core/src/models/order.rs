//! Cart lines and orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::types::{Email, OrderId, OrderStatus, PaymentMethod, Price, ProductId};

/// One cart or order line: a product snapshot plus quantity and size.
///
/// The product is flattened so a line serializes as the product record
/// with `quantity` and `selectedSize` added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl CartItem {
    /// Start a line with quantity 1.
    ///
    /// Reviews are dropped from the snapshot; lines only need what the
    /// invoice shows.
    #[must_use]
    pub fn new(product: &Product, selected_size: Option<String>) -> Self {
        let mut product = product.clone();
        product.reviews.clear();
        Self {
            product,
            quantity: 1,
            selected_size,
        }
    }

    /// Unit price captured when the line was added.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.product.price
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }

    /// Whether this line is for `product_id` in `size`.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, size: Option<&str>) -> bool {
        &self.product.id == product_id && self.selected_size.as_deref() == size
    }
}

/// A placed order.
///
/// Items are a frozen copy of the cart at checkout and `total` is computed
/// once from them; later product edits never touch historical orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<Email>,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Sum of line totals.
    #[must_use]
    pub fn items_total(items: &[CartItem]) -> Price {
        items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Whether the order id or phone contains `query`.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || self
                .id
                .as_str()
                .to_lowercase()
                .contains(&query.to_lowercase())
            || self.phone.contains(query)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn test_cart_item_json_is_flattened_product() {
        let product = defaults::initial_products().remove(0);
        let line = CartItem::new(&product, Some("1 كجم".to_string()));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["selectedSize"], "1 كجم");

        let back: CartItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn test_snapshot_drops_reviews() {
        let mut product = defaults::initial_products().remove(0);
        product.reviews = vec![crate::Review::new("علي", 5, "").unwrap()];
        let line = CartItem::new(&product, None);
        assert!(line.product.reviews.is_empty());
    }

    #[test]
    fn test_items_total() {
        let products = defaults::initial_products();
        let mut chicken = CartItem::new(&products[0], None);
        chicken.quantity = 2;
        let oil = CartItem::new(&products[2], None);
        assert_eq!(Order::items_total(&[chicken, oil]), Price::new(4500 * 2 + 2400));
    }
}
