//! Al-Raqi Core - Domain types and storefront rules.
//!
//! This crate is shared by every Al-Raqi component:
//! - `storefront` - Customer-facing catalog, cart and checkout
//! - `admin` - Back-office for products, categories, orders and settings
//! - `cli` - Migrations, seeding and admin password management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. Persistence lives in `alraqi-store`; the binaries wire
//! the two together.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails and statuses
//! - [`models`] - Product, order, customer, review and settings records
//! - [`cart`] - Session cart with merge-by-product-and-size semantics
//! - [`catalog`] - Category and free-text product filtering
//! - [`checkout`] - Checkout validation and order construction
//! - [`handoff`] - Order summaries and messaging/mail deep links
//! - [`stats`] - Admin dashboard figures
//! - [`defaults`] - Starter catalog and store settings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod defaults;
pub mod handoff;
pub mod models;
pub mod stats;
pub mod types;

pub use models::*;
pub use types::*;
