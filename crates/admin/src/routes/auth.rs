//! Back-office login and logout.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::services::AdminAuthService;
use crate::services::auth::FORGOT_PASSWORD_MESSAGE;
use crate::state::AppState;

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// Check the shared password and start an admin session.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<Value>> {
    AdminAuthService::new(state.store())
        .login(&form.password)
        .await?;
    set_current_admin(&session).await?;
    Ok(Json(json!({ "loggedIn": true })))
}

/// End the admin session.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_admin(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// There is no self-service recovery; point at the owner.
pub async fn forgot_password() -> Json<Value> {
    Json(json!({ "message": FORGOT_PASSWORD_MESSAGE }))
}
