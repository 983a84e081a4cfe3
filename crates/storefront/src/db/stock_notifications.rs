//! Back-in-stock requests.

use sqlx::PgPool;

use loja_core::models::StockNotification;
use loja_core::{Email, ProductId};

use super::RepositoryError;

const NOTIFICATION_COLUMNS: &str = "id, product_id, email, notified, created_at, notified_at";

/// Repository for stock notification requests.
pub struct StockNotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StockNotificationRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a request, reusing the pending one for the same product and
    /// email if it exists.
    ///
    /// Returns the request and whether it was newly created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn request(
        &self,
        product_id: ProductId,
        email: &Email,
    ) -> Result<(StockNotification, bool), RepositoryError> {
        let inserted = sqlx::query_as::<_, StockNotification>(&format!(
            r"
            INSERT INTO shop.stock_notification (product_id, email)
            VALUES ($1, $2)
            ON CONFLICT (product_id, email) WHERE NOT notified DO NOTHING
            RETURNING {NOTIFICATION_COLUMNS}
            "
        ))
        .bind(product_id)
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        if let Some(notification) = inserted {
            return Ok((notification, true));
        }

        let existing = sqlx::query_as::<_, StockNotification>(&format!(
            r"
            SELECT {NOTIFICATION_COLUMNS}
            FROM shop.stock_notification
            WHERE product_id = $1 AND email = $2 AND NOT notified
            "
        ))
        .bind(product_id)
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok((existing, false))
    }
}
