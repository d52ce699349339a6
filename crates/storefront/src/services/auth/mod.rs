//! Authentication service.
//!
//! Customer accounts with Argon2id password hashes. The hash never leaves
//! this module; callers get a [`Customer`].

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use serde::Deserialize;

use alraqi_core::{Customer, CustomerId, CustomerProfile, Email};
use alraqi_store::{CustomerRepository, RepositoryError, Store};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Registration form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub accept_terms: bool,
}

/// Profile edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Authentication service.
pub struct AuthService<'a> {
    store: &'a dyn Store,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    // =========================================================================
    // Registration & Login
    // =========================================================================

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TermsNotAccepted` if the terms box was not ticked.
    /// Returns `AuthError::MissingField` if the name is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn register(&self, form: &Registration) -> Result<Customer, AuthError> {
        if !form.accept_terms {
            return Err(AuthError::TermsNotAccepted);
        }
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        let email = Email::parse(&form.email)?;
        validate_password(&form.password)?;

        let password_hash = hash_password(&form.password)?;
        let customer = Customer {
            id: CustomerId::generate(),
            name: name.to_owned(),
            email,
            phone: form.phone.trim().to_owned(),
            address: form.address.trim().to_owned(),
            joined_at: Utc::now(),
        };

        self.store
            .create_customer(&customer, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(customer_id = %customer.id, "Customer registered");
        Ok(customer)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<Customer, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (customer, password_hash) = self
            .store
            .find_customer_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(customer)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Load a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CustomerNotFound` if the account is gone.
    pub async fn customer(&self, id: &CustomerId) -> Result<Customer, AuthError> {
        self.store
            .get_customer(id)
            .await?
            .ok_or(AuthError::CustomerNotFound)
    }

    /// Save profile edits and return the updated customer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if the name is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::EmailTaken` if another account uses the email.
    /// Returns `AuthError::CustomerNotFound` if the account is gone.
    pub async fn update_profile(
        &self,
        id: &CustomerId,
        update: &ProfileUpdate,
    ) -> Result<Customer, AuthError> {
        let name = update.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        let profile = CustomerProfile {
            name: name.to_owned(),
            email: Email::parse(&update.email)?,
            phone: update.phone.trim().to_owned(),
            address: update.address.trim().to_owned(),
        };

        let mut customer = self.customer(id).await?;
        customer.apply(profile);

        self.store
            .update_customer(&customer)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                RepositoryError::NotFound => AuthError::CustomerNotFound,
                other => AuthError::Repository(other),
            })?;

        Ok(customer)
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
