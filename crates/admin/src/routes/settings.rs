//! Store settings and admin password handlers.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use alraqi_core::{StoreSettings, defaults};
use alraqi_store::SettingsRepository;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::services::AdminAuthService;
use crate::services::auth::{PASSWORD_CHANGED_MESSAGE, PasswordChange};
use crate::state::AppState;

/// Shown after settings are saved.
pub const SETTINGS_SAVED_MESSAGE: &str = "تم حفظ الإعدادات بنجاح";

/// Current settings, or the starter settings if none were saved.
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<StoreSettings>> {
    let settings = state
        .store()
        .get_settings()
        .await?
        .unwrap_or_else(defaults::initial_settings);
    Ok(Json(settings))
}

/// Overwrite the whole settings document.
#[instrument(skip_all)]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(settings): Json<StoreSettings>,
) -> Result<Json<Value>> {
    state.store().save_settings(&settings).await?;
    tracing::info!("Store settings saved");
    Ok(Json(json!({
        "message": SETTINGS_SAVED_MESSAGE,
        "settings": settings,
    })))
}

#[instrument(skip_all)]
pub async fn change_password(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(form): Json<PasswordChange>,
) -> Result<Json<Value>> {
    AdminAuthService::new(state.store())
        .change_password(&form)
        .await?;
    Ok(Json(json!({ "message": PASSWORD_CHANGED_MESSAGE })))
}
