//! Al-Raqi Store - Persistence behind an explicit repository interface.
//!
//! Every piece of shared state (catalog, categories, orders, settings,
//! customers) is read and written through the traits in [`repository`].
//! Writes publish a [`StoreEvent`] naming the changed collection so that
//! caches and live views can reload.
//!
//! # Implementations
//!
//! - [`PgStore`] - `PostgreSQL`; change events also cross processes via
//!   `LISTEN`/`NOTIFY` so the storefront sees back-office edits.
//! - [`MemoryStore`] - in-process, used by tests and local demos.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/store/migrations/` and run via:
//! ```bash
//! cargo run -p alraqi-cli -- migrate
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod events;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::RepositoryError;
pub use events::{ChangeSubscription, EventBus, StoreEvent};
pub use memory::MemoryStore;
pub use postgres::{PgStore, create_pool};
pub use repository::{
    CatalogRepository, ChangeFeed, CustomerRepository, OrderRepository, SettingsRepository,
    SharedStore, Store,
};
