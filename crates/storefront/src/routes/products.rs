//! Catalog route handlers.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::ProductId;
use loja_core::models::{Banner, Product};

use crate::db::{BannerRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::validation::{ApiJson, optional};

/// Page size when none is requested.
const DEFAULT_PAGE_SIZE: i64 = 24;
/// Largest page size a client may ask for.
const MAX_PAGE_SIZE: i64 = 100;

/// Listing filters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    fn page(&self) -> (i64, i64) {
        let limit = self
            .limit
            .map_or(DEFAULT_PAGE_SIZE, |l| l.clamp(1, MAX_PAGE_SIZE));
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BannersResponse {
    pub banners: Vec<Banner>,
}

/// Active products, newest first.
///
/// GET /api/products?category=&limit=&offset=
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ApiJson<ProductsResponse>> {
    let (limit, offset) = query.page();
    let category = optional(query.category);

    let products = ProductRepository::new(state.pool())
        .list_active(category.as_deref(), limit, offset)
        .await?;

    Ok(ApiJson(ProductsResponse { products }))
}

/// Product detail.
///
/// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiJson<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_active(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado".to_string()))?;

    Ok(ApiJson(ProductResponse { product }))
}

/// Categories that have at least one active product.
///
/// GET /api/categories
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<ApiJson<CategoriesResponse>> {
    let categories = ProductRepository::new(state.pool()).categories().await?;
    Ok(ApiJson(CategoriesResponse { categories }))
}

/// Active banners in display order.
///
/// GET /api/banners
#[instrument(skip(state))]
pub async fn banners(State(state): State<AppState>) -> Result<ApiJson<BannersResponse>> {
    let banners = BannerRepository::new(state.pool()).list_active().await?;
    Ok(ApiJson(BannersResponse { banners }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        assert_eq!(ListQuery::default().page(), (DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn test_page_clamps() {
        let query = ListQuery {
            category: None,
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(query.page(), (MAX_PAGE_SIZE, 0));

        let query = ListQuery {
            category: None,
            limit: Some(0),
            offset: Some(48),
        };
        assert_eq!(query.page(), (1, 48));
    }
}
