//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Customer registration, login and profile edits
//! - `catalog` - Cached catalog snapshot, refreshed on store changes
//! - `checkout` - Turning a session cart into a persisted order

pub mod auth;
pub mod catalog;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use catalog::{CatalogCache, CatalogSnapshot};
pub use checkout::{CheckoutService, PlaceOrderError};
