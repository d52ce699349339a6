//! Domain records shared by the storefront, the back-office and the store.
//!
//! JSON field names are camelCase to match the records the browser client
//! already exchanges.

pub mod customer;
pub mod order;
pub mod product;
pub mod settings;

pub use customer::{Customer, CustomerProfile};
pub use order::{CartItem, Order};
pub use product::{Category, Product, Review, ReviewError};
pub use settings::StoreSettings;
