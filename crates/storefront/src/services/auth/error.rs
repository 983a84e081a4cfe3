//! Failures of account operations.

use thiserror::Error;

use crate::db::RepositoryError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed email: {0}")]
    InvalidEmail(#[from] loja_core::EmailError),

    /// Unknown email or wrong password. The two are not told apart.
    #[error("email or password did not match")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Carries the message shown to the customer.
    #[error("password rejected: {0}")]
    WeakPassword(String),

    #[error("argon2 could not hash the password")]
    PasswordHash,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
