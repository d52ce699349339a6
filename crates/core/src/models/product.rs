//! Products, categories and reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId, ReviewId};

/// A catalog category.
///
/// Categories are bare names. Products reference them by value, so removing
/// a category from the list leaves products that still carry its name.
pub type Category = String;

/// Lowest accepted review rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted review rating.
pub const MAX_RATING: u8 = 5;

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-discount price; shown struck through when higher than `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    pub category: Category,
    /// Image URL.
    pub image: String,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Size variants in display order, e.g. `["1 كجم", "2 كجم"]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Whether the product is on offer (original price above current price).
    #[must_use]
    pub fn has_offer(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }

    /// Rounded discount percentage when on offer.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u8> {
        self.original_price
            .and_then(|original| self.price.discount_percent_from(original))
    }

    /// Mean review rating rounded to one decimal place.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)] // review counts are tiny
        let mean = f64::from(total) / self.reviews.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }

    /// Whether `size` is a valid choice for this product.
    ///
    /// No size is always acceptable; a given size must be one of `sizes`.
    #[must_use]
    pub fn accepts_size(&self, size: Option<&str>) -> bool {
        size.is_none_or(|s| self.sizes.iter().any(|candidate| candidate == s))
    }
}

/// Errors that can occur when creating a [`Review`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// Rating outside 1-5.
    #[error("rating must be between {MIN_RATING} and {MAX_RATING} (got {0})")]
    RatingOutOfRange(u8),
    /// Reviewer name is blank.
    #[error("reviewer name cannot be empty")]
    MissingName,
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    /// Free-text display name of the reviewer (not a customer reference).
    pub customer_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
}

impl Review {
    /// Create a new review dated now.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::RatingOutOfRange` if `rating` is not 1-5.
    /// Returns `ReviewError::MissingName` if the reviewer name is blank.
    pub fn new(customer_name: &str, rating: u8, comment: &str) -> Result<Self, ReviewError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }
        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            return Err(ReviewError::MissingName);
        }
        Ok(Self {
            id: ReviewId::generate(),
            customer_name: customer_name.to_owned(),
            rating,
            comment: comment.trim().to_owned(),
            date: Utc::now(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn test_offer_detection() {
        let mut product = defaults::initial_products().remove(0);
        product.price = Price::new(4500);
        product.original_price = Some(Price::new(5200));
        assert!(product.has_offer());
        assert_eq!(product.discount_percent(), Some(13));

        product.original_price = Some(Price::new(4500));
        assert!(!product.has_offer());
        assert_eq!(product.discount_percent(), None);

        product.original_price = None;
        assert!(!product.has_offer());
    }

    #[test]
    fn test_average_rating() {
        let mut product = defaults::initial_products().remove(0);
        assert_eq!(product.average_rating(), None);

        product.reviews = vec![
            Review::new("علي", 5, "ممتاز").unwrap(),
            Review::new("سارة", 4, "جيد").unwrap(),
            Review::new("محمد", 4, "").unwrap(),
        ];
        assert_eq!(product.average_rating(), Some(4.3));
    }

    #[test]
    fn test_review_rating_bounds() {
        assert_eq!(
            Review::new("علي", 0, "x"),
            Err(ReviewError::RatingOutOfRange(0))
        );
        assert_eq!(
            Review::new("علي", 6, "x"),
            Err(ReviewError::RatingOutOfRange(6))
        );
        assert_eq!(Review::new("  ", 5, "x"), Err(ReviewError::MissingName));
        assert!(Review::new("علي", 1, "").is_ok());
    }

    #[test]
    fn test_accepts_size() {
        let product = defaults::initial_products().remove(0);
        assert!(product.accepts_size(None));
        assert!(product.accepts_size(Some("1 كجم")));
        assert!(!product.accepts_size(Some("5 كجم")));
    }

    #[test]
    fn test_product_json_shape() {
        let product = defaults::initial_products().remove(0);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["originalPrice"], 5200);
        assert_eq!(json["price"], 4500);
        assert!(json.get("barcode").is_none());
    }
}
