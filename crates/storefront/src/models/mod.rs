//! Session-held state for storefront visitors.

pub mod session;

pub use session::{CurrentCustomer, PlacedOrders, keys as session_keys};
