//! Order hand-off: text summaries and deep links.
//!
//! After checkout the customer can forward the order to the store over a
//! messaging app or by email. Both use the same summary text; the
//! messaging variant marks headings with `*bold*`.

use std::fmt::Write as _;

use serde::Serialize;

use crate::models::{Order, StoreSettings};
use crate::types::price::group_thousands;

/// Heading line of every summary.
const SUMMARY_TITLE: &str = "طلب جديد من متجر الراقي 🇸🇩";

/// Output flavour of [`order_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// Messaging apps: headings wrapped in `*`.
    Messaging,
    /// Plain text for email bodies.
    Email,
}

/// Everything the confirmation screen needs to forward an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Handoff {
    pub summary: String,
    pub whatsapp_url: String,
    pub mailto_url: String,
}

impl Handoff {
    /// Build all hand-off actions for `order`.
    #[must_use]
    pub fn for_order(order: &Order, settings: &StoreSettings) -> Self {
        Self {
            summary: order_summary(order, MessageStyle::Messaging),
            whatsapp_url: whatsapp_url(order, settings),
            mailto_url: mailto_url(order, settings),
        }
    }
}

/// Human-readable order summary.
#[must_use]
pub fn order_summary(order: &Order, style: MessageStyle) -> String {
    let b = match style {
        MessageStyle::Messaging => "*",
        MessageStyle::Email => "",
    };
    let date = order.created_at.format("%Y-%m-%d %H:%M");

    let mut message = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(message, "{b}{SUMMARY_TITLE}{b}\n");
    let _ = writeln!(message, "{b}رقم الطلب:{b} #{}", order.id);
    let _ = writeln!(message, "{b}التاريخ:{b} {date}");
    let _ = writeln!(message, "{b}العميل:{b} {}", order.customer_name);
    let _ = writeln!(message, "{b}الجوال:{b} {}", order.phone);
    let _ = writeln!(message, "{b}العنوان:{b} {}", order.address);
    let _ = writeln!(
        message,
        "{b}طريقة الدفع:{b} {}\n",
        order.payment_method.label()
    );
    let _ = writeln!(message, "{b}المنتجات:{b}");
    for (index, item) in order.items.iter().enumerate() {
        let size = item
            .selected_size
            .as_deref()
            .map(|s| format!(" [{s}]"))
            .unwrap_or_default();
        let _ = writeln!(
            message,
            "{}. {}{size} (الكمية: {}) - السعر: {} ج.س",
            index + 1,
            item.product.name,
            item.quantity,
            item.line_total().amount()
        );
    }
    let _ = writeln!(
        message,
        "\n{b}الإجمالي النهائي: {} ج.س{b}",
        group_thousands(order.total.amount())
    );
    message
}

/// Email subject for an order.
#[must_use]
pub fn email_subject(order: &Order) -> String {
    format!("فاتورة طلب رقم #{} - متجر الراقي", order.id)
}

/// `wa.me` link that opens a chat with the store, pre-filled with the summary.
#[must_use]
pub fn whatsapp_url(order: &Order, settings: &StoreSettings) -> String {
    format!(
        "https://wa.me/{}?text={}",
        settings.phone_digits(),
        urlencoding::encode(&order_summary(order, MessageStyle::Messaging))
    )
}

/// `mailto:` link addressed to the store's notification inbox.
#[must_use]
pub fn mailto_url(order: &Order, settings: &StoreSettings) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        settings.notification_email(),
        urlencoding::encode(&email_subject(order)),
        urlencoding::encode(&order_summary(order, MessageStyle::Email))
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::cart::Cart;
    use crate::checkout::{CheckoutForm, validate};
    use crate::defaults;
    use crate::types::{OrderId, PaymentMethod};

    fn order() -> Order {
        let products = defaults::initial_products();
        let mut cart = Cart::new();
        cart.add(&products[0], Some("2 كجم".into())).unwrap();
        cart.add(&products[0], Some("2 كجم".into())).unwrap();
        cart.add(&products[2], None).unwrap();
        let form = CheckoutForm {
            name: "علي".to_string(),
            phone: "0912345678".to_string(),
            address: "الخرطوم".to_string(),
            email: None,
            payment_method: PaymentMethod::BankTransfer,
            accept_terms: true,
        };
        validate(&form, &cart).unwrap().into_order(
            OrderId::new("-OabcDEF"),
            &cart,
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_messaging_summary() {
        let summary = order_summary(&order(), MessageStyle::Messaging);
        assert!(summary.starts_with("*طلب جديد من متجر الراقي 🇸🇩*\n\n"));
        assert!(summary.contains("*رقم الطلب:* #-OabcDEF\n"));
        assert!(summary.contains("*التاريخ:* 2026-03-01 09:30\n"));
        assert!(summary.contains("*طريقة الدفع:* تحويل بنكي (تطبيق بنكك)\n"));
        assert!(summary.contains("1. كيلو فراخ طازج (نخب أول) [2 كجم] (الكمية: 2) - السعر: 9000 ج.س\n"));
        assert!(summary.contains("2. زيت طعام كريستال (1 لتر) (الكمية: 1) - السعر: 2400 ج.س\n"));
        assert!(summary.ends_with("*الإجمالي النهائي: 11,400 ج.س*\n"));
    }

    #[test]
    fn test_email_summary_has_no_markers() {
        let summary = order_summary(&order(), MessageStyle::Email);
        assert!(!summary.contains('*'));
        assert!(summary.contains("رقم الطلب: #-OabcDEF"));
    }

    #[test]
    fn test_whatsapp_url_uses_phone_digits() {
        let url = whatsapp_url(&order(), &defaults::initial_settings());
        assert!(url.starts_with("https://wa.me/00249912345678?text="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_mailto_prefers_notification_email() {
        let mut settings = defaults::initial_settings();
        let url = mailto_url(&order(), &settings);
        assert!(url.starts_with("mailto:info@alraqi-sd.com?subject="));

        settings.admin_notification_email = Some("orders@alraqi-sd.com".to_string());
        let url = mailto_url(&order(), &settings);
        assert!(url.starts_with("mailto:orders@alraqi-sd.com?subject="));
        assert!(url.contains(&*urlencoding::encode("فاتورة طلب رقم #-OabcDEF - متجر الراقي")));
    }
}
