//! Customer accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, Email};

/// A registered customer.
///
/// The password never appears here; the store keeps only its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub joined_at: DateTime<Utc>,
}

/// Editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
}

impl Customer {
    /// Apply profile edits.
    pub fn apply(&mut self, profile: CustomerProfile) {
        self.name = profile.name;
        self.email = profile.email;
        self.phone = profile.phone;
        self.address = profile.address;
    }
}
