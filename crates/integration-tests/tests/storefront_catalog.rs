//! Integration tests for the storefront catalog, cart and content.
//!
//! These tests require:
//! - A migrated and seeded database (loja-cli migrate, loja-cli seed content ..)
//! - The storefront server running (cargo run -p loja-storefront)

use reqwest::StatusCode;
use serde_json::json;

use loja_core::models::Product;
use loja_integration_tests::{json_body, registered_customer, session_client, storefront_url};

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_product_list_is_active_only() {
    let resp = session_client()
        .get(format!("{}/api/products?limit=100", storefront_url()))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    let products: Vec<Product> =
        serde_json::from_value(body["products"].clone()).expect("Invalid product list");
    assert!(products.len() <= 100);
    assert!(products.iter().all(|p| p.active));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_search_short_query_returns_nothing() {
    let resp = session_client()
        .get(format!("{}/api/search?q=%20a%20", storefront_url()))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["query"], "a");
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_starts_empty_and_rejects_unknown_product() {
    let base_url = storefront_url();
    let client = session_client();

    let resp = client
        .get(format!("{base_url}/api/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["itemCount"], 0);

    let resp = client
        .post(format!("{base_url}/api/cart/items"))
        .json(&json!({ "productId": i32::MAX, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_checkout_with_empty_cart_is_rejected() {
    let (client, _) = registered_customer().await;

    let resp = client
        .post(format!("{}/api/orders", storefront_url()))
        .json(&json!({
            "shipping": {
                "name": "Cliente de Teste",
                "address": "Rua das Flores 1",
                "city": "Lisboa",
                "postalCode": "1000-001",
            }
        }))
        .send()
        .await
        .expect("Failed to check out");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "O carrinho está vazio");
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded content"]
async fn test_content_by_key_and_language() {
    let base_url = storefront_url();

    let resp = session_client()
        .get(format!("{base_url}/api/content/catalog.out_of_stock?lang=en"))
        .send()
        .await
        .expect("Failed to get content");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["value"], "Out of stock");

    let resp = session_client()
        .get(format!("{base_url}/api/content/nao.existe"))
        .send()
        .await
        .expect("Failed to get content");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
