//! Admin authentication error types.

use thiserror::Error;

use alraqi_store::RepositoryError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Login password does not match.
    #[error("wrong password")]
    WrongPassword,

    /// No admin password has been set yet.
    #[error("admin password not configured")]
    NotConfigured,

    /// Current password given for a change does not match.
    #[error("current password does not match")]
    WrongCurrentPassword,

    /// New password and confirmation differ.
    #[error("new password and confirmation differ")]
    Mismatch,

    /// New password too short.
    #[error("password must be at least {0} characters")]
    TooShort(usize),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AdminAuthError {
    /// Arabic message for the back-office.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::WrongPassword | Self::NotConfigured => "كلمة المرور غير صحيحة",
            Self::WrongCurrentPassword => "كلمة المرور الحالية غير صحيحة",
            Self::Mismatch => "كلمات المرور غير متطابقة",
            Self::TooShort(_) => "كلمة المرور قصيرة جداً",
            Self::Repository(_) | Self::PasswordHash => "حدث خطأ، يرجى المحاولة لاحقاً",
        }
    }
}
