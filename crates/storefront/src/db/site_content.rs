//! Site content reads.

use sqlx::PgPool;

use loja_core::models::SiteContent;

use super::RepositoryError;

/// Repository for editable interface copy.
pub struct SiteContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SiteContentRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every entry, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<SiteContent>, RepositoryError> {
        let entries = sqlx::query_as::<_, SiteContent>(
            "SELECT key, value_pt, value_en, description, updated_at FROM shop.site_content ORDER BY key",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// A single entry by key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<SiteContent>, RepositoryError> {
        let entry = sqlx::query_as::<_, SiteContent>(
            "SELECT key, value_pt, value_en, description, updated_at FROM shop.site_content WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(self.pool)
        .await?;

        Ok(entry)
    }
}
