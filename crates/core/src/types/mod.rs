//! Core types for Al-Raqi.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod push_key;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use push_key::PushKeyGenerator;
pub use status::*;
