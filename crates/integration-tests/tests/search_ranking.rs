//! Integration tests for search suggestion ordering.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (loja-cli migrate)
//! - Both servers running (cargo run -p loja-storefront, cargo run -p loja-admin)
//! - An admin account in `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD`

use reqwest::StatusCode;
use serde_json::json;

use loja_integration_tests::{
    admin_client, admin_url, create_product, json_body, session_client, storefront_url,
};

#[tokio::test]
#[ignore = "Requires running storefront and admin servers and admin credentials"]
async fn test_name_prefix_then_substring_then_other_fields() {
    let admin = admin_client().await;
    let token = uuid::Uuid::new_v4().simple().to_string();
    let token = token.get(..10).unwrap_or(&token).to_string();

    // Created out of order so the ranking, not insertion, decides
    let mut created = Vec::new();
    for fields in [
        json!({ "name": "Zeta", "description": format!("Compatível com {token}") }),
        json!({ "name": format!("Kit {token}") }),
        json!({ "name": format!("{token} beta") }),
        json!({ "name": "Omega", "sku": format!("SKU-{token}") }),
        json!({ "name": format!("{token} alfa") }),
    ] {
        created.push(create_product(&admin, fields).await);
    }

    let resp = session_client()
        .get(format!("{}/api/search?q={token}&limit=50", storefront_url()))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    let names: Vec<&str> = body["results"]
        .as_array()
        .expect("results is not a list")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();

    assert_eq!(
        names,
        [
            format!("{token} alfa").as_str(),
            format!("{token} beta").as_str(),
            format!("Kit {token}").as_str(),
            "Omega",
            "Zeta",
        ]
    );

    for product in &created {
        let _ = admin
            .delete(format!("{}/api/admin/products/{}", admin_url(), product["id"]))
            .send()
            .await;
    }
}
