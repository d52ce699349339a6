//! Authentication error types.

use thiserror::Error;

use alraqi_core::EmailError;
use alraqi_store::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong password or unknown email.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Password too short.
    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    /// Registration without accepting the terms.
    #[error("terms not accepted")]
    TermsNotAccepted,

    /// A required profile field is blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Logged-in customer no longer exists.
    #[error("customer not found")]
    CustomerNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Arabic message for the customer.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "البريد الإلكتروني غير صحيح",
            Self::InvalidCredentials => "البريد الإلكتروني أو كلمة المرور غير صحيحة",
            Self::EmailTaken => "البريد الإلكتروني مسجل مسبقاً",
            Self::WeakPassword(_) => "كلمة المرور يجب أن تكون 4 أحرف على الأقل",
            Self::TermsNotAccepted => "يجب الموافقة على الشروط والأحكام",
            Self::MissingField(_) => "يرجى تعبئة جميع الحقول المطلوبة",
            Self::CustomerNotFound => "الحساب غير موجود",
            Self::Repository(_) | Self::PasswordHash => "حدث خطأ، يرجى المحاولة لاحقاً",
        }
    }
}
