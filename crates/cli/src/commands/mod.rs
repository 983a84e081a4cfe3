//! Subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Read `DATABASE_URL` (after loading `.env`) and open a pool.
///
/// # Errors
///
/// Returns `DatabaseUrlError::Missing` if the variable is unset, or
/// `DatabaseUrlError::Connect` if the database cannot be reached.
pub async fn connect() -> Result<PgPool, DatabaseUrlError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| DatabaseUrlError::Missing("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(loja_admin::db::create_pool(&database_url).await?)
}

/// Errors opening the database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseUrlError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    /// Connection failed.
    #[error("Database connection error: {0}")]
    Connect(#[from] sqlx::Error),
}
