//! Delivery location kept in the visitor's session.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use alraqi_core::defaults::DEFAULT_DELIVERY_LOCATION;

use crate::error::{AppError, Result};
use crate::models::session_keys;

#[derive(Debug, Serialize, Deserialize)]
pub struct Location {
    pub location: String,
}

/// The visitor's delivery location, or the store default.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<Location>> {
    let location = session
        .get::<String>(session_keys::LOCATION)
        .await?
        .unwrap_or_else(|| DEFAULT_DELIVERY_LOCATION.to_string());
    Ok(Json(Location { location }))
}

#[instrument(skip(session))]
pub async fn update(session: Session, Json(form): Json<Location>) -> Result<Json<Location>> {
    let location = form.location.trim();
    if location.is_empty() {
        return Err(AppError::BadRequest("يرجى إدخال موقع التوصيل".to_string()));
    }
    session.insert(session_keys::LOCATION, location).await?;
    Ok(Json(Location {
        location: location.to_owned(),
    }))
}
