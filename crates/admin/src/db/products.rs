//! Catalog management.

use rust_decimal::Decimal;
use sqlx::PgPool;

use loja_core::ProductId;
use loja_core::models::Product;

use super::{RepositoryError, conflict_on_unique, require_affected};

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, category, sku, \
                               image_url, active, created_at, updated_at";

/// Every editable product field. Updates replace all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub sku: String,
    pub image_url: Option<String>,
    pub active: bool,
}

/// Repository for the product catalog, inactive products included.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products, newest first. `query` narrows by name or SKU.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let pattern = query.map(|q| format!("%{}%", escape_like(q)));

        let products = sqlx::query_as::<_, Product>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM shop.product
            WHERE $1::TEXT IS NULL
               OR name ILIKE $1 ESCAPE '\'
               OR sku ILIKE $1 ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// A single product, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the SKU is already used.
    pub async fn create(&self, fields: &ProductFields) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            r"
            INSERT INTO shop.product
                (name, description, price, stock, category, sku, image_url, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.stock)
        .bind(&fields.category)
        .bind(&fields.sku)
        .bind(fields.image_url.as_deref())
        .bind(fields.active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "SKU"))
    }

    /// Replace every editable field of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Conflict` if the SKU belongs to another product.
    pub async fn update(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            r"
            UPDATE shop.product
            SET name = $2, description = $3, price = $4, stock = $5, category = $6,
                sku = $7, image_url = $8, active = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.stock)
        .bind(&fields.category)
        .bind(&fields.sku)
        .bind(fields.image_url.as_deref())
        .bind(fields.active)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "SKU"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a product. Its pending stock notifications go with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}

/// Escape `LIKE` wildcards so the filter matches them literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("VAP-1"), "VAP-1");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\"), "c:\\\\");
    }
}
