//! Integration tests for the admin back office.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (loja-cli migrate)
//! - Both servers running (cargo run -p loja-storefront, cargo run -p loja-admin)
//! - An admin account in `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD`

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use loja_integration_tests::{
    admin_client, admin_url, create_product, json_body, registered_customer, session_client,
    storefront_url,
};

async fn create_stocked_product(client: &Client, stock: i32) -> Value {
    create_product(client, json!({ "stock": stock })).await
}

async fn delete_product(client: &Client, id: &Value) {
    let _ = client
        .delete(format!("{}/api/admin/products/{id}", admin_url()))
        .send()
        .await;
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_admin_routes_require_session() {
    let resp = session_client()
        .get(format!("{}/api/admin/dashboard", admin_url()))
        .send()
        .await
        .expect("Failed to reach admin");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers"]
async fn test_customer_cannot_log_in_to_admin() {
    let (_, email) = registered_customer().await;

    let resp = session_client()
        .post(format!("{}/api/admin/login", admin_url()))
        .json(&json!({ "email": email, "password": "palavra-passe-segura" }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running admin server and admin credentials"]
async fn test_product_crud_and_duplicate_sku() {
    let client = admin_client().await;
    let base_url = admin_url();
    let product = create_stocked_product(&client, 4).await;
    let id = &product["id"];

    let resp = client
        .post(format!("{base_url}/api/admin/products"))
        .json(&json!({ "name": "Cópia", "price": "1.00", "sku": product["sku"] }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "SKU já existe");

    let resp = client
        .put(format!("{base_url}/api/admin/products/{id}"))
        .json(&json!({
            "name": "Vaporizador de Teste",
            "price": "19.90",
            "stock": 0,
            "sku": product["sku"],
            "active": false,
        }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json_body(resp).await;
    assert_eq!(updated["product"]["price"], "19.90");
    assert_eq!(updated["product"]["active"], false);

    // Inactive products disappear from the storefront
    let resp = session_client()
        .get(format!("{}/api/products/{id}", storefront_url()))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{base_url}/api/admin/products/{id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/api/admin/products/{id}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers and admin credentials"]
async fn test_order_lifecycle() {
    let admin = admin_client().await;
    let product = create_stocked_product(&admin, 2).await;
    let product_id = &product["id"];

    let (customer, email) = registered_customer().await;
    let storefront = storefront_url();

    let resp = customer
        .post(format!("{storefront}/api/cart/items"))
        .json(&json!({ "productId": product_id, "quantity": 3 }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = customer
        .post(format!("{storefront}/api/cart/items"))
        .json(&json!({ "productId": product_id, "quantity": 2 }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["total"], "49.80");

    let resp = customer
        .post(format!("{storefront}/api/orders"))
        .json(&json!({
            "shipping": {
                "name": "Cliente de Teste",
                "address": "Rua das Flores 1",
                "city": "Porto",
                "postalCode": "4000-001",
            }
        }))
        .send()
        .await
        .expect("Failed to check out");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order = json_body(resp).await["order"].clone();
    assert_eq!(order["status"], "pending");
    let order_id = &order["id"];

    // Stock was taken by the order
    let resp = admin
        .get(format!("{}/api/admin/products/{product_id}", admin_url()))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(json_body(resp).await["product"]["stock"], 0);

    let resp = admin
        .patch(format!("{}/api/admin/orders/{order_id}/status", admin_url()))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Failed to set status");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json_body(resp).await;
    assert_eq!(updated["order"]["status"], "shipped");
    assert_eq!(updated["order"]["customerEmail"], email.as_str());

    let resp = admin
        .patch(format!("{}/api/admin/orders/{order_id}/tracking", admin_url()))
        .json(&json!({ "trackingNumber": "CTT123456789PT" }))
        .send()
        .await
        .expect("Failed to set tracking");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = customer
        .get(format!("{storefront}/api/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to get order");
    assert_eq!(resp.status(), StatusCode::OK);
    let seen = json_body(resp).await;
    assert_eq!(seen["order"]["status"], "shipped");
    assert_eq!(seen["order"]["trackingNumber"], "CTT123456789PT");
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers and admin credentials"]
async fn test_stock_notification_flow() {
    let admin = admin_client().await;
    let product = create_stocked_product(&admin, 0).await;
    let product_id = &product["id"];

    for _ in 0..2 {
        let resp = session_client()
            .post(format!("{}/api/stock-notifications", storefront_url()))
            .json(&json!({ "productId": product_id, "email": "aviso@teste.lojavapor.pt" }))
            .send()
            .await
            .expect("Failed to request notification");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = admin
        .post(format!(
            "{}/api/admin/stock-notifications/products/{product_id}/notified",
            admin_url()
        ))
        .send()
        .await
        .expect("Failed to mark notified");
    assert_eq!(resp.status(), StatusCode::OK);
    // The repeated request did not create a second row
    assert_eq!(json_body(resp).await["updated"], 1);

    delete_product(&admin, product_id).await;
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers and admin credentials"]
async fn test_content_edit_is_visible_on_storefront() {
    let admin = admin_client().await;
    let key = format!("teste.{}", uuid::Uuid::new_v4().simple());

    let resp = admin
        .put(format!("{}/api/admin/content/{key}", admin_url()))
        .json(&json!({ "valuePt": "Olá", "valueEn": "Hello" }))
        .send()
        .await
        .expect("Failed to upsert content");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = session_client()
        .get(format!("{}/api/content/{key}?lang=en", storefront_url()))
        .send()
        .await
        .expect("Failed to get content");
    assert_eq!(json_body(resp).await["value"], "Hello");

    let resp = admin
        .put(format!("{}/api/admin/content/Chave%20Inv%C3%A1lida", admin_url()))
        .json(&json!({ "valuePt": "x" }))
        .send()
        .await
        .expect("Failed to upsert content");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = admin
        .delete(format!("{}/api/admin/content/{key}", admin_url()))
        .send()
        .await
        .expect("Failed to delete content");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
