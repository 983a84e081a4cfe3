//! Back-in-stock requests.
//!
//! Nothing is mailed from here; marking a request notified only records that
//! the shop has contacted the visitor.

use sqlx::PgPool;

use loja_core::models::StockNotification;
use loja_core::{ProductId, StockNotificationId};

use super::{RepositoryError, require_affected};

const NOTIFICATION_COLUMNS: &str = "id, product_id, email, notified, created_at, notified_at";

/// Repository for stock notifications.
pub struct StockNotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StockNotificationRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Requests, newest first. `pending_only` hides the ones already handled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        pending_only: bool,
    ) -> Result<Vec<StockNotification>, RepositoryError> {
        let notifications = sqlx::query_as::<_, StockNotification>(&format!(
            r"
            SELECT {NOTIFICATION_COLUMNS}
            FROM shop.stock_notification
            WHERE NOT ($1 AND notified)
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(pending_only)
        .fetch_all(self.pool)
        .await?;

        Ok(notifications)
    }

    /// Mark one request as notified. Already-notified requests keep their
    /// original timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request does not exist.
    pub async fn mark_notified(
        &self,
        id: StockNotificationId,
    ) -> Result<StockNotification, RepositoryError> {
        sqlx::query_as::<_, StockNotification>(&format!(
            r"
            UPDATE shop.stock_notification
            SET notified = TRUE, notified_at = COALESCE(notified_at, NOW())
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Mark every pending request for a product as notified.
    ///
    /// Returns how many requests changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_product_notified(
        &self,
        product_id: ProductId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shop.stock_notification
            SET notified = TRUE, notified_at = NOW()
            WHERE product_id = $1 AND NOT notified
            ",
        )
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request does not exist.
    pub async fn delete(&self, id: StockNotificationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.stock_notification WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
