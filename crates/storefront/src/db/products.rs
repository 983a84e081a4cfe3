//! Read-only catalog queries for the storefront.

use sqlx::PgPool;

use loja_core::ProductId;
use loja_core::models::Product;

use super::RepositoryError;
use crate::search::{LIKE_ESCAPE, SearchTerm};

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, category, sku, \
                                          image_url, active, created_at, updated_at";

/// Repository for catalog reads. Only active products are visible.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active products, newest first, optionally narrowed to one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(
        &self,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM shop.product
            WHERE active AND ($1::TEXT IS NULL OR category = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// A single active product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE id = $1 AND active"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Distinct non-empty categories of active products, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT category
            FROM shop.product
            WHERE active AND category <> ''
            ORDER BY category
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Search suggestions ranked by how the name matches.
    ///
    /// Name prefix matches come first, then substring matches, then products
    /// that only match on description or SKU. Ties are ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(
        &self,
        term: &SearchTerm,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM shop.product
            WHERE active
              AND (name ILIKE $1 ESCAPE '{LIKE_ESCAPE}'
                   OR description ILIKE $1 ESCAPE '{LIKE_ESCAPE}'
                   OR sku ILIKE $1 ESCAPE '{LIKE_ESCAPE}')
            ORDER BY
                CASE
                    WHEN name ILIKE $2 ESCAPE '{LIKE_ESCAPE}' THEN 1
                    WHEN name ILIKE $1 ESCAPE '{LIKE_ESCAPE}' THEN 2
                    ELSE 3
                END,
                name
            LIMIT $3
            "
        ))
        .bind(term.contains_pattern())
        .bind(term.prefix_pattern())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
