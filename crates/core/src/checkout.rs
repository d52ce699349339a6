//! Checkout validation and order construction.
//!
//! Validation runs in a fixed order: terms acceptance, then a non-empty
//! cart, then the required contact fields, then the optional email. A
//! rejected checkout creates nothing and leaves the cart as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::models::{Customer, Order};
use crate::types::{Email, EmailError, OrderId, OrderStatus, PaymentMethod};

/// Shown when the terms box is not ticked.
pub const TERMS_REQUIRED_MESSAGE: &str = "يجب الموافقة على الشروط والأحكام لإتمام الطلب";
/// Shown when name, phone or address is blank.
pub const MISSING_FIELDS_MESSAGE: &str = "يرجى تعبئة جميع البيانات (الاسم، الجوال، العنوان)";
/// Shown when checking out an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "سلة التسوق فارغة";
/// Shown when the optional email is malformed.
pub const INVALID_EMAIL_MESSAGE: &str = "البريد الإلكتروني غير صحيح";
/// Shown after the order is stored.
pub const ORDER_PLACED_MESSAGE: &str = "✅ تم إرسال طلبك بنجاح!";

/// Checkout form as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub accept_terms: bool,
}

impl CheckoutForm {
    /// Form pre-filled from a logged-in customer's profile.
    #[must_use]
    pub fn prefilled(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            email: Some(customer.email.to_string()),
            payment_method: PaymentMethod::default(),
            accept_terms: false,
        }
    }
}

/// Reasons a checkout is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("terms and conditions not accepted")]
    TermsNotAccepted,
    #[error("cart is empty")]
    EmptyCart,
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("invalid email: {0}")]
    InvalidEmail(EmailError),
}

impl CheckoutError {
    /// Arabic message for the customer.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::TermsNotAccepted => TERMS_REQUIRED_MESSAGE,
            Self::EmptyCart => EMPTY_CART_MESSAGE,
            Self::MissingFields(_) => MISSING_FIELDS_MESSAGE,
            Self::InvalidEmail(_) => INVALID_EMAIL_MESSAGE,
        }
    }
}

/// A checkout that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheckout {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub customer_email: Option<Email>,
    pub payment_method: PaymentMethod,
}

/// Validate a checkout form against the current cart.
///
/// # Errors
///
/// Returns the first failing [`CheckoutError`] in validation order.
pub fn validate(form: &CheckoutForm, cart: &Cart) -> Result<ValidatedCheckout, CheckoutError> {
    if !form.accept_terms {
        return Err(CheckoutError::TermsNotAccepted);
    }
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let name = form.name.trim();
    let phone = form.phone.trim();
    let address = form.address.trim();
    let missing: Vec<&'static str> = [("name", name), ("phone", phone), ("address", address)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
    if !missing.is_empty() {
        return Err(CheckoutError::MissingFields(missing));
    }

    let customer_email = match form.email.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(Email::parse(raw).map_err(CheckoutError::InvalidEmail)?),
    };

    Ok(ValidatedCheckout {
        customer_name: name.to_owned(),
        phone: phone.to_owned(),
        address: address.to_owned(),
        customer_email,
        payment_method: form.payment_method,
    })
}

impl ValidatedCheckout {
    /// Build the pending order from a snapshot of `cart`.
    #[must_use]
    pub fn into_order(self, id: OrderId, cart: &Cart, created_at: DateTime<Utc>) -> Order {
        let items = cart.items().to_vec();
        let total = Order::items_total(&items);
        Order {
            id,
            customer_name: self.customer_name,
            phone: self.phone,
            address: self.address,
            customer_email: self.customer_email,
            items,
            total,
            status: OrderStatus::Pending,
            payment_method: self.payment_method,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::types::Price;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Ali".to_string(),
            phone: "0912345678".to_string(),
            address: "Khartoum".to_string(),
            email: None,
            payment_method: PaymentMethod::Cod,
            accept_terms: true,
        }
    }

    fn cart_with_two_chickens() -> Cart {
        let chicken = defaults::initial_products().remove(0);
        let mut cart = Cart::new();
        cart.add(&chicken, None).unwrap();
        cart.add(&chicken, None).unwrap();
        cart
    }

    #[test]
    fn test_terms_checked_before_everything() {
        let form = CheckoutForm {
            accept_terms: false,
            ..CheckoutForm::default()
        };
        let err = validate(&form, &Cart::new()).unwrap_err();
        assert_eq!(err, CheckoutError::TermsNotAccepted);
        assert_eq!(err.user_message(), TERMS_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = validate(&form(), &Cart::new()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let cart = cart_with_two_chickens();
        for blank in ["name", "phone", "address"] {
            let mut form = form();
            match blank {
                "name" => form.name = "   ".to_string(),
                "phone" => form.phone = String::new(),
                _ => form.address = String::new(),
            }
            let err = validate(&form, &cart).unwrap_err();
            assert_eq!(err, CheckoutError::MissingFields(vec![blank]));
            assert_eq!(err.user_message(), MISSING_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn test_invalid_optional_email() {
        let mut form = form();
        form.email = Some("not-an-email".to_string());
        let err = validate(&form, &cart_with_two_chickens()).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidEmail(_)));

        form.email = Some("  ".to_string());
        assert!(validate(&form, &cart_with_two_chickens()).is_ok());
    }

    #[test]
    fn test_order_total_and_status() {
        let cart = cart_with_two_chickens();
        let order = validate(&form(), &cart)
            .unwrap()
            .into_order(OrderId::new("k1"), &cart, Utc::now());

        assert_eq!(order.total, Price::new(9000));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.customer_name, "Ali");
    }

    #[test]
    fn test_order_items_are_a_snapshot() {
        let mut cart = cart_with_two_chickens();
        let order = validate(&form(), &cart)
            .unwrap()
            .into_order(OrderId::new("k1"), &cart, Utc::now());

        cart.clear();
        let mut repriced = defaults::initial_products().remove(0);
        repriced.price = Price::new(1);
        cart.add(&repriced, None).unwrap();

        assert_eq!(order.items[0].product.price, Price::new(4500));
        assert_eq!(order.total, Price::new(9000));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut form = form();
        form.name = "  Ali ".to_string();
        let validated = validate(&form, &cart_with_two_chickens()).unwrap();
        assert_eq!(validated.customer_name, "Ali");
    }
}
