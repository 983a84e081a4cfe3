//! Product management route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::ProductId;
use loja_core::models::Product;

use crate::db::ProductRepository;
use crate::db::products::ProductFields;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::validation::{self, ApiJson, optional, required};

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// Query parameters for the product list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Matches name or SKU.
    pub q: Option<String>,
}

/// Create and update payload. Updates replace every field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

impl ProductRequest {
    /// Check the payload and turn it into database fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a missing name or SKU, or a
    /// negative price or stock.
    pub fn validate(self) -> Result<ProductFields> {
        Ok(ProductFields {
            name: required(self.name, "nome")?,
            sku: required(self.sku, "SKU")?,
            price: validation::price(self.price)?,
            stock: validation::stock(self.stock)?,
            description: optional(self.description).unwrap_or_default(),
            category: optional(self.category).unwrap_or_default(),
            image_url: optional(self.image_url),
            active: self.active.unwrap_or(true),
        })
    }
}

/// Body returned for a single product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// Every product, inactive ones included.
///
/// GET /api/admin/products
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = optional(query.q);
    let products = ProductRepository::new(state.pool())
        .list(filter.as_deref())
        .await?;
    Ok(Json(products))
}

/// One product.
///
/// GET /api/admin/products/{id}
#[instrument(skip_all, fields(admin_id = %admin.user_id, product_id = id))]
async fn show(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado".to_string()))?;
    Ok(Json(ProductResponse { product }))
}

/// Add a product.
///
/// POST /api/admin/products
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let fields = payload.validate()?;
    let product = ProductRepository::new(state.pool()).create(&fields).await?;

    tracing::info!(product_id = %product.id, sku = %product.sku, "Product created");
    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}

/// Replace a product.
///
/// PUT /api/admin/products/{id}
#[instrument(skip_all, fields(admin_id = %admin.user_id, product_id = id))]
async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    let fields = payload.validate()?;
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &fields)
        .await?;

    tracing::info!("Product updated");
    Ok(Json(ProductResponse { product }))
}

/// Delete a product.
///
/// DELETE /api/admin/products/{id}
#[instrument(skip_all, fields(admin_id = %admin.user_id, product_id = id))]
async fn destroy(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    tracing::info!("Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> ProductRequest {
        ProductRequest {
            name: Some(" Vaporizador X ".into()),
            sku: Some("VAP-X".into()),
            price: Some(Decimal::new(4990, 2)),
            stock: Some(3),
            ..ProductRequest::default()
        }
    }

    #[test]
    fn test_validate_fills_defaults() {
        let fields = valid().validate().unwrap();
        assert_eq!(fields.name, "Vaporizador X");
        assert_eq!(fields.description, "");
        assert_eq!(fields.category, "");
        assert_eq!(fields.image_url, None);
        assert!(fields.active);
    }

    #[test]
    fn test_validate_requires_name_and_sku() {
        let err = ProductRequest { name: None, ..valid() }.validate().unwrap_err();
        assert_eq!(err.public_message(), "O campo nome é obrigatório");

        let err = ProductRequest { sku: Some(" ".into()), ..valid() }
            .validate()
            .unwrap_err();
        assert_eq!(err.public_message(), "O campo SKU é obrigatório");
    }

    #[test]
    fn test_validate_rejects_negative_numbers() {
        assert!(
            ProductRequest { price: Some(Decimal::new(-100, 2)), ..valid() }
                .validate()
                .is_err()
        );
        assert!(ProductRequest { stock: Some(-2), ..valid() }.validate().is_err());
    }

    #[test]
    fn test_request_accepts_camel_case_and_string_price() {
        let payload: ProductRequest = serde_json::from_str(
            r#"{"name":"Filtro","sku":"FLT-1","price":"4.50","imageUrl":"/f.jpg","active":false}"#,
        )
        .unwrap();
        let fields = payload.validate().unwrap();
        assert_eq!(fields.price, Decimal::new(450, 2));
        assert_eq!(fields.image_url.as_deref(), Some("/f.jpg"));
        assert!(!fields.active);
    }
}
