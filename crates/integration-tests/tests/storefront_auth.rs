//! Integration tests for storefront accounts.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (loja-cli migrate)
//! - The storefront server running (cargo run -p loja-storefront)

use reqwest::StatusCode;
use serde_json::json;

use loja_integration_tests::{
    json_body, registered_customer, session_client, storefront_url, unique_email,
};

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let resp = session_client()
        .get(format!("{}/health/ready", storefront_url()))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_register_me_logout() {
    let base_url = storefront_url();
    let (client, email) = registered_customer().await;

    let resp = client
        .get(format!("{base_url}/api/auth/me"))
        .send()
        .await
        .expect("Failed to get me");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["user"].get("passwordHash").is_none());

    let resp = client
        .post(format!("{base_url}/api/auth/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/api/auth/me"))
        .send()
        .await
        .expect("Failed to get me");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_duplicate_registration_is_rejected() {
    let base_url = storefront_url();
    let (_, email) = registered_customer().await;

    let resp = session_client()
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({
            "email": email.to_uppercase(),
            "password": "outra-palavra-passe",
            "name": "Outro",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_wrong_password_is_unauthorized() {
    let base_url = storefront_url();
    let (_, email) = registered_customer().await;

    for (email, password) in [
        (email.as_str(), "palavra-passe-errada"),
        (unique_email("ninguem").as_str(), "palavra-passe-segura"),
    ] {
        let resp = session_client()
            .post(format!("{base_url}/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to log in");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "Credenciais inválidas");
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_account_requires_login() {
    let base_url = storefront_url();
    for path in ["/api/account", "/api/orders"] {
        let resp = session_client()
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
}
