//! Back-office journey: orders placed on the storefront are managed in the
//! admin, and catalog edits reach the storefront.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use alraqi_integration_tests::{TestContext, eventually};

async fn place_order(ctx: &TestContext) -> String {
    ctx.shopper
        .post(ctx.storefront("/api/cart/add"))
        .json(&json!({ "productId": "3" }))
        .send()
        .await
        .unwrap();
    let confirmation: Value = ctx
        .shopper
        .post(ctx.storefront("/api/checkout"))
        .json(&json!({
            "name": "Fatima",
            "phone": "0923456789",
            "address": "Omdurman",
            "acceptTerms": true,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    confirmation["order"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_requires_login() {
    let ctx = TestContext::new().await;
    let resp = ctx.admin.get(ctx.admin("/api/orders")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_status_workflow() {
    let ctx = TestContext::new().await;
    let id = place_order(&ctx).await;
    ctx.admin_login().await;

    let orders: Value = ctx
        .admin
        .get(ctx.admin("/api/orders?q=0923"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["id"], id.as_str());

    for status in ["processing", "shipped", "delivered", "pending"] {
        let updated: Value = ctx
            .admin
            .put(ctx.admin(&format!("/api/orders/{id}/status")))
            .json(&json!({ "status": status }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(updated["status"], status);
    }

    let stats: Value = ctx
        .admin
        .get(ctx.admin("/api/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["totalOrders"], 1);
    assert_eq!(stats["pendingOrders"], 1);
    assert_eq!(stats["totalRevenue"], 0);

    let resp = ctx
        .admin
        .get(ctx.admin(&format!("/orders/{id}/print?type=packing_slip")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Omdurman"));
}

#[tokio::test]
async fn test_price_edit_reaches_storefront_but_not_placed_orders() {
    let ctx = TestContext::new().await;
    let id = place_order(&ctx).await;
    ctx.admin_login().await;

    let resp = ctx
        .admin
        .put(ctx.admin("/api/products/3"))
        .json(&json!({
            "name": "زيت طعام كريستال (1 لتر)",
            "price": 2600,
            "category": "سلع تموينية",
            "stock": 90,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    eventually(|| async {
        let product: Value = ctx
            .shopper
            .get(ctx.storefront("/api/products/3"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        product["price"] == 2600
    })
    .await;

    let order: Value = ctx
        .admin
        .get(ctx.admin(&format!("/api/orders/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(order["total"], 2400);
    assert_eq!(order["items"][0]["price"], 2400);
    assert_eq!(order["nextStatus"], "processing");
}

#[tokio::test]
async fn test_deleted_category_leaves_products() {
    let ctx = TestContext::new().await;
    ctx.admin_login().await;

    let resp = ctx
        .admin
        .delete(ctx.admin("/api/categories/سلع تموينية"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let product: Value = ctx
        .admin
        .get(ctx.admin("/api/products/4"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["category"], "سلع تموينية");
}

#[tokio::test]
async fn test_settings_and_password_change() {
    let ctx = TestContext::new().await;
    ctx.admin_login().await;

    let mut settings: Value = ctx
        .admin
        .get(ctx.admin("/api/settings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    settings["name"] = json!("الراقي");
    let saved: Value = ctx
        .admin
        .put(ctx.admin("/api/settings"))
        .json(&settings)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["message"], "تم حفظ الإعدادات بنجاح");

    eventually(|| async {
        let public: Value = ctx
            .shopper
            .get(ctx.storefront("/api/settings"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        public["name"] == "الراقي"
    })
    .await;

    let resp = ctx
        .admin
        .post(ctx.admin("/api/settings/password"))
        .json(&json!({
            "currentPassword": "5605",
            "newPassword": "7777",
            "confirmPassword": "7777",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let fresh = reqwest::Client::new();
    let resp = fresh
        .post(ctx.admin("/api/login"))
        .json(&json!({ "password": "5605" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
