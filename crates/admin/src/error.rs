//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use alraqi_store::RepositoryError;

use crate::services::{AdminAuthError, CatalogAdminError};

const INTERNAL_MESSAGE: &str = "حدث خطأ، يرجى المحاولة لاحقاً";

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),

    /// Password check or change failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AdminAuthError),

    /// Product or category edit rejected.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogAdminError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn is_server_error(&self) -> bool {
        match self {
            Self::Store(_) | Self::Session(_) | Self::Template(_) | Self::Internal(_) => true,
            Self::Auth(err) => matches!(
                err,
                AdminAuthError::Repository(_) | AdminAuthError::PasswordHash
            ),
            Self::Catalog(err) => matches!(err, CatalogAdminError::Repository(_)),
            Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }

    fn status(&self) -> StatusCode {
        if self.is_server_error() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        match self {
            Self::Auth(AdminAuthError::WrongPassword | AdminAuthError::NotConfigured) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Catalog(
                CatalogAdminError::ProductNotFound(_) | CatalogAdminError::CategoryNotFound(_),
            )
            | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogAdminError::DuplicateCategory(_)) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        if self.is_server_error() {
            return INTERNAL_MESSAGE.to_string();
        }
        match self {
            Self::Auth(err) => err.user_message().to_string(),
            Self::Catalog(err) => err.user_message().to_string(),
            Self::NotFound(what) | Self::BadRequest(what) => what.clone(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
