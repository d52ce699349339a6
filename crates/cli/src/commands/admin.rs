//! Back-office password command.
//!
//! # Usage
//!
//! ```bash
//! alraqi-cli admin set-password --password 'new-password'
//! ```

use thiserror::Error;

use alraqi_admin::services::auth::MIN_PASSWORD_LENGTH;
use alraqi_admin::services::{AdminAuthError, hash_password};
use alraqi_store::{PgStore, RepositoryError, SettingsRepository};

use super::{ConnectError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Password must be at least {0} characters")]
    TooShort(usize),

    #[error("Hashing failed: {0}")]
    Hash(#[from] AdminAuthError),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Replace the shared admin password.
pub async fn set_password(password: &str) -> Result<(), AdminError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AdminError::TooShort(MIN_PASSWORD_LENGTH));
    }

    let hash = hash_password(password)?;
    let store = PgStore::new(connect().await?);
    store.set_admin_password_hash(&hash).await?;

    tracing::info!("Admin password updated");
    Ok(())
}
