//! Session-related types.
//!
//! Everything a visitor owns exclusively (cart, delivery location, login,
//! placed orders) lives in their session rather than in the shared store.

use serde::{Deserialize, Serialize};

use alraqi_core::{Customer, CustomerId, Email, OrderId};

/// Session-stored customer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCustomer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
}

impl From<&Customer> for CurrentCustomer {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
        }
    }
}

/// Orders placed from this session, oldest first.
///
/// Hand-off links and invoices are only served for these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacedOrders(Vec<OrderId>);

impl PlacedOrders {
    /// Remembered orders are capped; the oldest fall off first.
    pub const LIMIT: usize = 20;

    pub fn push(&mut self, id: OrderId) {
        self.0.push(id);
        if self.0.len() > Self::LIMIT {
            let excess = self.0.len() - Self::LIMIT;
            self.0.drain(..excess);
        }
    }

    #[must_use]
    pub fn contains(&self, id: &OrderId) -> bool {
        self.0.contains(id)
    }
}

/// Session keys.
pub mod keys {
    /// The logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// The visitor's cart.
    pub const CART: &str = "cart";

    /// Last-used delivery location.
    pub const LOCATION: &str = "delivery_location";

    /// Orders placed from this session.
    pub const PLACED_ORDERS: &str = "placed_orders";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placed_orders_forget_oldest() {
        let mut placed = PlacedOrders::default();
        for i in 0..=PlacedOrders::LIMIT {
            placed.push(OrderId::new(format!("order-{i}")));
        }
        assert!(!placed.contains(&OrderId::new("order-0")));
        assert!(placed.contains(&OrderId::new("order-1")));
        assert!(placed.contains(&OrderId::new(format!("order-{}", PlacedOrders::LIMIT))));
    }
}
