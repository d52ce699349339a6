//! Customer accounts: register, checkout defaults, my orders, reviews.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use alraqi_integration_tests::TestContext;

async fn register(ctx: &TestContext) {
    let resp = ctx
        .shopper
        .post(ctx.storefront("/api/auth/register"))
        .json(&json!({
            "name": "Ali",
            "email": "ali@alraqi-sd.com",
            "password": "1234",
            "phone": "0912345678",
            "address": "Khartoum",
            "acceptTerms": true,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let ctx = TestContext::new().await;
    register(&ctx).await;

    let other = reqwest::Client::new();
    let resp = other
        .post(ctx.storefront("/api/auth/register"))
        .json(&json!({
            "name": "Ali 2",
            "email": "ALI@alraqi-sd.com",
            "password": "abcd",
            "phone": "0999",
            "address": "Bahri",
            "acceptTerms": true,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_checkout_prefill_and_my_orders() {
    let ctx = TestContext::new().await;
    register(&ctx).await;

    let page: Value = ctx
        .shopper
        .get(ctx.storefront("/api/checkout"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["form"]["name"], "Ali");
    assert_eq!(page["form"]["address"], "Khartoum");

    ctx.shopper
        .post(ctx.storefront("/api/cart/add"))
        .json(&json!({ "productId": "2" }))
        .send()
        .await
        .unwrap();
    let mut form = page["form"].clone();
    form["acceptTerms"] = json!(true);
    let resp = ctx
        .shopper
        .post(ctx.storefront("/api/checkout"))
        .json(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let orders: Value = ctx
        .shopper
        .get(ctx.storefront("/api/account/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["total"], 3800);
}

#[tokio::test]
async fn test_review_shows_in_my_reviews() {
    let ctx = TestContext::new().await;
    register(&ctx).await;

    let resp = ctx
        .shopper
        .post(ctx.storefront("/api/products/4/reviews"))
        .json(&json!({ "rating": 4, "comment": "سكر ممتاز" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let reviews: Value = ctx
        .shopper
        .get(ctx.storefront("/api/account/reviews"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["rating"], 4);

    let resp = ctx
        .shopper
        .post(ctx.storefront("/api/products/4/reviews"))
        .json(&json!({ "rating": 9, "comment": "?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
