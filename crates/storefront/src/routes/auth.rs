//! Customer registration, login and logout.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use alraqi_core::Customer;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_customer, set_current_customer};
use crate::models::CurrentCustomer;
use crate::services::AuthService;
use crate::services::auth::Registration;
use crate::state::AppState;

/// Create an account and log it in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<Registration>,
) -> Result<(StatusCode, Json<Customer>)> {
    let customer = AuthService::new(state.store()).register(&form).await?;
    log_in(&session, &customer).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<Customer>> {
    let customer = AuthService::new(state.store())
        .login(&form.email, &form.password)
        .await?;
    log_in(&session, &customer).await?;
    tracing::info!(customer_id = %customer.id, "Customer logged in");
    Ok(Json(customer))
}

/// Log out. The cart stays with the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_customer(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

async fn log_in(session: &Session, customer: &Customer) -> Result<()> {
    set_current_customer(session, &CurrentCustomer::from(customer)).await?;
    set_sentry_user(&customer.id, Some(customer.email.as_str()));
    Ok(())
}
