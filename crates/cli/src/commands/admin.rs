//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new account with the admin flag
//! loja-cli admin create -e gestao@lojavapor.pt -n "Gestão" -p 'uma-palavra-passe-longa'
//!
//! # Toggle the flag on an existing account
//! loja-cli admin promote -e ana@example.pt
//! loja-cli admin demote -e ana@example.pt
//! ```

use thiserror::Error;

use loja_admin::db::{RepositoryError, UserRepository};
use loja_admin::services::{AdminAuthError, AdminAuthService};
use loja_core::{Email, EmailError};

use super::{DatabaseUrlError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connection(#[from] DatabaseUrlError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Account creation failed.
    #[error("{0}")]
    Auth(#[from] AdminAuthError),

    /// No account with that email.
    #[error("No account found with email: {0}")]
    UserNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Repository(RepositoryError),
}

/// Create a new admin account.
///
/// # Errors
///
/// Returns `AdminError` if the email or password is rejected, the email is
/// taken, or the database fails.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<(), AdminError> {
    let pool = connect().await?;

    tracing::info!("Creating admin user: {}", email);
    let user = AdminAuthService::new(&pool)
        .create_admin(email, name, password)
        .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );
    Ok(())
}

/// Set or clear the admin flag of an existing account.
///
/// # Errors
///
/// Returns `AdminError::UserNotFound` if no account has that email.
pub async fn set_flag(email: &str, is_admin: bool) -> Result<(), AdminError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;

    UserRepository::new(&pool)
        .set_admin_by_email(&email, is_admin)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AdminError::UserNotFound(email.to_string()),
            other => AdminError::Repository(other),
        })?;

    if is_admin {
        tracing::info!("{} is now an administrator", email);
    } else {
        tracing::info!("{} is no longer an administrator", email);
    }
    Ok(())
}
