//! User accounts as seen from the back office.

use sqlx::PgPool;

use loja_core::{Email, UserId};

use super::{RepositoryError, conflict_on_unique, require_affected};
use crate::models::user::UserSummary;

const SUMMARY_COLUMNS: &str = "id, email, name, phone, city, country, is_admin, created_at";

/// What the login check needs to know about an account.
#[derive(Debug, sqlx::FromRow)]
pub struct Credentials {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub is_admin: bool,
    pub password_hash: String,
}

/// Repository for user accounts.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<UserSummary>, RepositoryError> {
        let users = sqlx::query_as::<_, UserSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM shop.\"user\" ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Login data for an email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<Credentials>, RepositoryError> {
        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id, email, name, is_admin, password_hash FROM shop.\"user\" WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(credentials)
    }

    /// Current value of the admin flag. `None` if the account is gone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_admin(&self, id: UserId) -> Result<Option<bool>, RepositoryError> {
        let flag = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM shop.\"user\" WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(flag)
    }

    /// Grant or revoke back-office access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    pub async fn set_admin(
        &self,
        id: UserId,
        is_admin: bool,
    ) -> Result<UserSummary, RepositoryError> {
        sqlx::query_as::<_, UserSummary>(&format!(
            r#"
            UPDATE shop."user"
            SET is_admin = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(is_admin)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Create an account that already has back-office access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn create_admin(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<UserSummary, RepositoryError> {
        sqlx::query_as::<_, UserSummary>(&format!(
            r#"
            INSERT INTO shop."user" (email, name, password_hash, is_admin)
            VALUES ($1, $2, $3, TRUE)
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(email.as_str())
        .bind(name)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Email"))
    }

    /// Grant or revoke back-office access by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no account has that email.
    pub async fn set_admin_by_email(
        &self,
        email: &Email,
        is_admin: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE shop.\"user\" SET is_admin = $2, updated_at = NOW() WHERE email = $1",
        )
        .bind(email.as_str())
        .bind(is_admin)
        .execute(self.pool)
        .await?;

        require_affected(result.rows_affected())
    }
}
