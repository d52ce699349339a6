//! Account pages: profile, order history and reviews.
//!
//! All handlers require a logged-in customer.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use alraqi_core::{Customer, Order, Product, ProductId};
use alraqi_store::OrderRepository;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{CurrentCustomer, session_keys};
use crate::services::AuthService;
use crate::services::auth::ProfileUpdate;
use crate::state::AppState;

/// Profile of the logged-in customer.
#[instrument(skip(state, customer), fields(customer_id = %customer.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Customer>> {
    let customer = AuthService::new(state.store()).customer(&customer.id).await?;
    Ok(Json(customer))
}

/// Save profile edits.
#[instrument(skip(state, session, customer, update), fields(customer_id = %customer.id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(customer): RequireAuth,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Customer>> {
    let updated = AuthService::new(state.store())
        .update_profile(&customer.id, &update)
        .await?;

    // Keep the session copy in step with the new name and email
    session
        .insert(session_keys::CURRENT_CUSTOMER, CurrentCustomer::from(&updated))
        .await?;
    Ok(Json(updated))
}

/// Orders placed with the customer's phone number, newest first.
#[instrument(skip(state, customer), fields(customer_id = %customer.id))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let customer = AuthService::new(state.store()).customer(&customer.id).await?;
    let phone = customer.phone.trim();
    if phone.is_empty() {
        return Ok(Json(Vec::new()));
    }
    Ok(Json(state.store().orders_by_phone(phone).await?))
}

/// A review with the product it belongs to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyReview {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
}

/// Reviews signed with the customer's name, newest first.
///
/// Reviews carry a display name rather than an account reference, so this
/// matches on name.
#[instrument(skip(state, customer), fields(customer_id = %customer.id))]
pub async fn reviews(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Vec<MyReview>>> {
    let snapshot = state.catalog().snapshot(state.store()).await?;
    Ok(Json(reviews_by(&snapshot.products, &customer.name)))
}

fn reviews_by(products: &[Product], name: &str) -> Vec<MyReview> {
    let mut found: Vec<MyReview> = products
        .iter()
        .flat_map(|product| {
            product
                .reviews
                .iter()
                .filter(|r| r.customer_name == name)
                .map(|r| MyReview {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    product_image: product.image.clone(),
                    rating: r.rating,
                    comment: r.comment.clone(),
                    date: r.date,
                })
        })
        .collect();
    found.sort_by(|a, b| b.date.cmp(&a.date));
    found
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alraqi_core::{Review, defaults};
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_reviews_by_name_newest_first() {
        let mut products = defaults::initial_products();

        let mut older = Review::new("Ali", 4, "جيد").unwrap();
        older.date = Utc::now() - Duration::days(2);
        let newer = Review::new("Ali", 5, "ممتاز").unwrap();
        let other = Review::new("Sara", 3, "").unwrap();

        products[0].reviews = vec![older, other];
        products[1].reviews = vec![newer];

        let found = reviews_by(&products, "Ali");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].rating, 5);
        assert_eq!(found[0].product_id, products[1].id);
        assert_eq!(found[1].product_name, products[0].name);
    }
}
