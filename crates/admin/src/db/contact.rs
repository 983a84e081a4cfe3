//! Contact form inbox.

use sqlx::PgPool;

use loja_core::ContactMessageId;
use loja_core::models::ContactMessage;

use super::{RepositoryError, require_affected};

const MESSAGE_COLUMNS: &str = "id, name, email, phone, subject, message, read, created_at";

/// Repository for contact messages.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Messages, newest first. `unread_only` hides the ones already read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, unread_only: bool) -> Result<Vec<ContactMessage>, RepositoryError> {
        let messages = sqlx::query_as::<_, ContactMessage>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS}
            FROM shop.contact_message
            WHERE NOT ($1 AND read)
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(unread_only)
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Flag a message as read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message does not exist.
    pub async fn mark_read(&self, id: ContactMessageId) -> Result<ContactMessage, RepositoryError> {
        sqlx::query_as::<_, ContactMessage>(&format!(
            "UPDATE shop.contact_message SET read = TRUE WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message does not exist.
    pub async fn delete(&self, id: ContactMessageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.contact_message WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}
