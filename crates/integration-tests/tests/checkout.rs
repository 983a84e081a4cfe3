//! Integration tests for checkout stock and price handling.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (loja-cli migrate)
//! - Both servers running (cargo run -p loja-storefront, cargo run -p loja-admin)
//! - An admin account in `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD`

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use loja_integration_tests::{
    admin_client, admin_url, create_product, json_body, registered_customer, shipping,
    storefront_url, update_product,
};

async fn add_to_cart(customer: &Client, product: &Value, quantity: u32) {
    let resp = customer
        .post(format!("{}/api/cart/items", storefront_url()))
        .json(&json!({ "productId": product["id"], "quantity": quantity }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::OK);
}

async fn checkout(customer: &Client) -> reqwest::Response {
    customer
        .post(format!("{}/api/orders", storefront_url()))
        .json(&json!({ "shipping": shipping() }))
        .send()
        .await
        .expect("Failed to check out")
}

async fn delete_product(admin: &Client, product: &Value) {
    let _ = admin
        .delete(format!("{}/api/admin/products/{}", admin_url(), product["id"]))
        .send()
        .await;
}

async fn stock_of(admin: &Client, product: &Value) -> Value {
    let resp = admin
        .get(format!("{}/api/admin/products/{}", admin_url(), product["id"]))
        .send()
        .await
        .expect("Failed to get product");
    json_body(resp).await["product"]["stock"].clone()
}

async fn order_count(customer: &Client) -> usize {
    let resp = customer
        .get(format!("{}/api/orders", storefront_url()))
        .send()
        .await
        .expect("Failed to list orders");
    json_body(resp).await["orders"]
        .as_array()
        .map_or(0, Vec::len)
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers and admin credentials"]
async fn test_checkout_rolls_back_when_stock_ran_out() {
    let admin = admin_client().await;
    let product = create_product(&admin, json!({ "stock": 2 })).await;
    let (customer, _) = registered_customer().await;

    add_to_cart(&customer, &product, 2).await;
    update_product(&admin, &product, json!({ "stock": 1 })).await;

    let resp = checkout(&customer).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "Stock insuficiente");

    assert_eq!(stock_of(&admin, &product).await, 1);
    assert_eq!(order_count(&customer).await, 0);

    let resp = customer
        .get(format!("{}/api/cart", storefront_url()))
        .send()
        .await
        .expect("Failed to get cart");
    let cart = json_body(resp).await;
    assert_eq!(cart["itemCount"], 2);
    assert_eq!(cart["items"][0]["productId"], product["id"]);

    delete_product(&admin, &product).await;
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers and admin credentials"]
async fn test_order_uses_current_catalog_price() {
    let admin = admin_client().await;
    let product = create_product(&admin, json!({ "stock": 3, "price": "24.90" })).await;
    let (customer, _) = registered_customer().await;

    add_to_cart(&customer, &product, 2).await;
    update_product(&admin, &product, json!({ "price": "19.90" })).await;

    let resp = checkout(&customer).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order = json_body(resp).await["order"].clone();
    assert_eq!(order["items"][0]["price"], "19.90");
    assert_eq!(order["total"], "39.80");

    delete_product(&admin, &product).await;
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers and admin credentials"]
async fn test_concurrent_checkouts_place_one_order() {
    let admin = admin_client().await;
    let product = create_product(&admin, json!({ "stock": 4 })).await;
    let (customer, _) = registered_customer().await;

    add_to_cart(&customer, &product, 1).await;

    let (first, second) = tokio::join!(checkout(&customer), checkout(&customer));
    let statuses = [first.status(), second.status()];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1,
        "{statuses:?}"
    );
    assert!(statuses.contains(&StatusCode::BAD_REQUEST), "{statuses:?}");

    assert_eq!(stock_of(&admin, &product).await, 3);
    assert_eq!(order_count(&customer).await, 1);

    delete_product(&admin, &product).await;
}
