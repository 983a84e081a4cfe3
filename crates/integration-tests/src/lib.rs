//! Integration tests for Loja.
//!
//! The tests talk to running servers over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database
//! loja-cli migrate
//! loja-cli seed content crates/cli/seeds/site_content.yaml
//! loja-cli admin create -e "$ADMIN_TEST_EMAIL" -n Testes -p "$ADMIN_TEST_PASSWORD"
//!
//! # Start both servers, then
//! cargo test -p loja-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - Storefront server (default: `http://localhost:3000`)
//! - `ADMIN_BASE_URL` - Admin server (default: `http://localhost:3001`)
//! - `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD` - An existing admin account

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL of the storefront server.
#[must_use]
pub fn storefront_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL of the admin server.
#[must_use]
pub fn admin_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Client that keeps session cookies between requests.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// An email address no other test run has used.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@teste.lojavapor.pt", uuid::Uuid::new_v4().simple())
}

/// Register a fresh storefront customer and return the logged-in client.
///
/// # Panics
///
/// Panics if registration does not return 201.
pub async fn registered_customer() -> (Client, String) {
    let client = session_client();
    let email = unique_email("cliente");
    let resp = client
        .post(format!("{}/api/auth/register", storefront_url()))
        .json(&json!({
            "email": email,
            "password": "palavra-passe-segura",
            "name": "Cliente de Teste",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    (client, email)
}

/// Log in to the admin server with the account from the environment.
///
/// # Panics
///
/// Panics if the credentials are not set or the login fails.
pub async fn admin_client() -> Client {
    let email = std::env::var("ADMIN_TEST_EMAIL").expect("ADMIN_TEST_EMAIL not set");
    let password = std::env::var("ADMIN_TEST_PASSWORD").expect("ADMIN_TEST_PASSWORD not set");

    let client = session_client();
    let resp = client
        .post(format!("{}/api/admin/login", admin_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert!(resp.status().is_success(), "admin login failed: {}", resp.status());
    client
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn json_body(resp: reqwest::Response) -> Value {
    resp.json().await.expect("Response body is not JSON")
}

/// Create a product through the admin API and return its JSON.
///
/// `fields` is merged over an active product with a unique SKU, stock 5 and
/// price 24.90.
///
/// # Panics
///
/// Panics if the product is not created.
pub async fn create_product(admin: &Client, fields: Value) -> Value {
    let mut body = json!({
        "name": "Vaporizador de Teste",
        "description": "Criado pelos testes de integração",
        "price": "24.90",
        "stock": 5,
        "category": "testes",
        "sku": format!("TESTE-{}", uuid::Uuid::new_v4().simple()),
    });
    if let (Some(base), Value::Object(extra)) = (body.as_object_mut(), fields) {
        base.extend(extra);
    }

    let resp = admin
        .post(format!("{}/api/admin/products", admin_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    json_body(resp).await["product"].clone()
}

/// Replace a product through the admin API, keeping the fields not given.
///
/// # Panics
///
/// Panics if the update fails.
pub async fn update_product(admin: &Client, product: &Value, fields: Value) -> Value {
    let mut body = json!({
        "name": product["name"],
        "description": product["description"],
        "price": product["price"],
        "stock": product["stock"],
        "category": product["category"],
        "sku": product["sku"],
        "imageUrl": product["imageUrl"],
        "active": product["active"],
    });
    if let (Some(base), Value::Object(extra)) = (body.as_object_mut(), fields) {
        base.extend(extra);
    }

    let resp = admin
        .put(format!("{}/api/admin/products/{}", admin_url(), product["id"]))
        .json(&body)
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    json_body(resp).await["product"].clone()
}

/// Shipping block accepted by checkout.
#[must_use]
pub fn shipping() -> Value {
    json!({
        "name": "Cliente de Teste",
        "address": "Rua das Flores 1",
        "city": "Porto",
        "postalCode": "4000-001",
    })
}
