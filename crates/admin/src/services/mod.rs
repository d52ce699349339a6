//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Shared admin password: login, change, hashing
//! - `catalog` - Product and category edits

pub mod auth;
pub mod catalog;

pub use auth::{AdminAuthError, AdminAuthService, hash_password};
pub use catalog::{CatalogAdmin, CatalogAdminError, ProductForm};
