//! Store settings singleton.

use serde::{Deserialize, Serialize};

/// Branding, contact and payment details shown across the store.
///
/// Saved as a whole document; the last writer wins. The admin password is
/// not part of this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    /// Where order notifications go; falls back to `email`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notification_email: Option<String>,
    pub address: String,
    pub instagram: String,
    pub twitter: String,
    pub whatsapp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_name: Option<String>,
    #[serde(default, rename = "bankIBAN", skip_serializing_if = "Option::is_none")]
    pub bank_iban: Option<String>,
}

impl StoreSettings {
    /// Address that receives order notifications.
    #[must_use]
    pub fn notification_email(&self) -> &str {
        self.admin_notification_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(&self.email)
    }

    /// Store phone number with everything but digits removed.
    ///
    /// Used for messaging deep links, which take bare international numbers.
    #[must_use]
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(char::is_ascii_digit).collect()
    }
}
