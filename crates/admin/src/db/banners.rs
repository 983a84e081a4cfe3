//! Home page banner management.

use sqlx::PgPool;

use loja_core::BannerId;
use loja_core::models::Banner;

use super::{RepositoryError, require_affected};

const BANNER_COLUMNS: &str =
    "id, title, subtitle, image_url, link_url, position, active, created_at, updated_at";

/// Every editable banner field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerFields {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i32,
    pub active: bool,
}

/// Repository for banners.
pub struct BannerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BannerRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All banners in display order, inactive ones included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Banner>, RepositoryError> {
        let banners = sqlx::query_as::<_, Banner>(&format!(
            "SELECT {BANNER_COLUMNS} FROM shop.banner ORDER BY position, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(banners)
    }

    /// Add a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, fields: &BannerFields) -> Result<Banner, RepositoryError> {
        let banner = sqlx::query_as::<_, Banner>(&format!(
            r"
            INSERT INTO shop.banner (title, subtitle, image_url, link_url, position, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {BANNER_COLUMNS}
            "
        ))
        .bind(&fields.title)
        .bind(fields.subtitle.as_deref())
        .bind(&fields.image_url)
        .bind(fields.link_url.as_deref())
        .bind(fields.position)
        .bind(fields.active)
        .fetch_one(self.pool)
        .await?;

        Ok(banner)
    }

    /// Replace every editable field of a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner does not exist.
    pub async fn update(
        &self,
        id: BannerId,
        fields: &BannerFields,
    ) -> Result<Banner, RepositoryError> {
        sqlx::query_as::<_, Banner>(&format!(
            r"
            UPDATE shop.banner
            SET title = $2, subtitle = $3, image_url = $4, link_url = $5,
                position = $6, active = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {BANNER_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(fields.subtitle.as_deref())
        .bind(&fields.image_url)
        .bind(fields.link_url.as_deref())
        .bind(fields.position)
        .bind(fields.active)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner does not exist.
    pub async fn delete(&self, id: BannerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.banner WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
