//! Home page banners.

use sqlx::PgPool;

use loja_core::models::Banner;

use super::RepositoryError;

/// Repository for banner reads.
pub struct BannerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BannerRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active banners in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Banner>, RepositoryError> {
        let banners = sqlx::query_as::<_, Banner>(
            r"
            SELECT id, title, subtitle, image_url, link_url, position, active,
                   created_at, updated_at
            FROM shop.banner
            WHERE active
            ORDER BY position, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(banners)
    }
}
