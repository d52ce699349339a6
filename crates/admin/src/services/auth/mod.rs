//! Admin authentication service.
//!
//! The back-office has one shared password, stored as an Argon2id hash
//! beside the store settings. Verification happens here; the hash is never
//! sent to a client.

mod error;

pub use error::AdminAuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use tracing::instrument;

use alraqi_store::{SettingsRepository, Store};

/// Minimum length for a new admin password.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Shown when someone asks to recover the password.
pub const FORGOT_PASSWORD_MESSAGE: &str = "لأمان متجرك، لا تتوفر ميزة استعادة كلمة المرور آلياً. يرجى التواصل مع المالك مباشرة عبر واتساب أو البريد الإلكتروني المسجل لإعادة ضبط كلمة المرور.";

/// Shown after a successful password change.
pub const PASSWORD_CHANGED_MESSAGE: &str = "تم تغيير كلمة المرور بنجاح";

/// Password change form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    store: &'a dyn Store,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Check the shared admin password.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::WrongPassword` on mismatch and
    /// `AdminAuthError::NotConfigured` if no password was ever set.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &str) -> Result<(), AdminAuthError> {
        let Some(hash) = self.store.admin_password_hash().await? else {
            tracing::warn!("Admin login attempted before a password was set; run `alraqi-cli admin set-password`");
            return Err(AdminAuthError::NotConfigured);
        };

        verify_password(password, &hash).map_err(|_| AdminAuthError::WrongPassword)?;
        tracing::info!("Admin logged in");
        Ok(())
    }

    /// Replace the admin password.
    ///
    /// Checks run in order: current password, confirmation, length.
    ///
    /// # Errors
    ///
    /// Returns the first failed check, or a repository error.
    #[instrument(skip_all)]
    pub async fn change_password(&self, form: &PasswordChange) -> Result<(), AdminAuthError> {
        let hash = self
            .store
            .admin_password_hash()
            .await?
            .ok_or(AdminAuthError::WrongCurrentPassword)?;
        verify_password(&form.current_password, &hash)
            .map_err(|_| AdminAuthError::WrongCurrentPassword)?;

        if form.new_password != form.confirm_password {
            return Err(AdminAuthError::Mismatch);
        }
        if form.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AdminAuthError::TooShort(MIN_PASSWORD_LENGTH));
        }

        let new_hash = hash_password(&form.new_password)?;
        self.store.set_admin_password_hash(&new_hash).await?;
        tracing::info!("Admin password changed");
        Ok(())
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AdminAuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AdminAuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AdminAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminAuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AdminAuthError::WrongPassword)
}
