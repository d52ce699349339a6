//! Back-office dashboard figures.

use serde::Serialize;

use crate::models::{Order, Product};
use crate::types::{OrderStatus, Price};

/// Stock below this counts towards the low-stock figure.
pub const LOW_STOCK_THRESHOLD: u32 = 5;
/// Stock below this puts a product on the restock list.
pub const RESTOCK_LIST_THRESHOLD: u32 = 10;
/// Number of orders in the recent-orders panel.
pub const RECENT_ORDERS: usize = 5;

/// Summary figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of totals over orders past `pending`.
    pub total_revenue: Price,
    pub total_orders: usize,
    pub pending_orders: usize,
    pub total_products: usize,
    pub low_stock: usize,
    pub restock: Vec<Product>,
    pub recent_orders: Vec<Order>,
}

impl DashboardStats {
    /// Compute the figures; `orders` must be newest first.
    #[must_use]
    pub fn compute(products: &[Product], orders: &[Order]) -> Self {
        Self {
            total_revenue: orders
                .iter()
                .filter(|o| o.status.is_confirmed())
                .map(|o| o.total)
                .sum(),
            total_orders: orders.len(),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            total_products: products.len(),
            low_stock: products
                .iter()
                .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
                .count(),
            restock: products
                .iter()
                .filter(|p| p.stock < RESTOCK_LIST_THRESHOLD)
                .cloned()
                .collect(),
            recent_orders: orders.iter().take(RECENT_ORDERS).cloned().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::cart::Cart;
    use crate::checkout::{CheckoutForm, validate};
    use crate::defaults;
    use crate::types::OrderId;

    fn order(id: &str, status: OrderStatus) -> Order {
        let mut cart = Cart::new();
        cart.add(&defaults::initial_products()[1], None).unwrap();
        let form = CheckoutForm {
            name: "Ali".into(),
            phone: "0912".into(),
            address: "Khartoum".into(),
            accept_terms: true,
            ..CheckoutForm::default()
        };
        let mut order = validate(&form, &cart)
            .unwrap()
            .into_order(OrderId::new(id), &cart, Utc::now());
        order.status = status;
        order
    }

    #[test]
    fn test_revenue_excludes_pending() {
        let orders = vec![
            order("c", OrderStatus::Delivered),
            order("b", OrderStatus::Pending),
            order("a", OrderStatus::Processing),
        ];
        let stats = DashboardStats::compute(&defaults::initial_products(), &orders);
        assert_eq!(stats.total_revenue, Price::new(3800 * 2));
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.pending_orders, 1);
    }

    #[test]
    fn test_stock_thresholds() {
        let mut products = defaults::initial_products();
        products[0].stock = 4;
        products[1].stock = 9;
        let stats = DashboardStats::compute(&products, &[]);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.restock.len(), 2);
        assert_eq!(stats.total_products, 4);
    }

    #[test]
    fn test_recent_orders_capped() {
        let orders: Vec<Order> = (0..8)
            .map(|n| order(&n.to_string(), OrderStatus::Pending))
            .collect();
        let stats = DashboardStats::compute(&[], &orders);
        assert_eq!(stats.recent_orders.len(), RECENT_ORDERS);
        assert_eq!(stats.recent_orders[0].id, OrderId::new("0"));
    }
}
