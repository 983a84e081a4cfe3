//! Database operations for the back office.
//!
//! # Schema: `shop` (shared with the storefront)
//!
//! The back office manages everything the storefront reads:
//!
//! - `user` - Accounts and the `is_admin` flag
//! - `product`, `banner` - Catalog
//! - `customer_order` - Orders (status and tracking)
//! - `site_content` - Editable interface copy
//! - `contact_message`, `stock_notification` - Visitor submissions
//! - `admin_session` - Tower-sessions storage for admin logins
//!
//! # Migrations
//!
//! The storefront crate owns the migrations. Run them via:
//! ```bash
//! cargo run -p loja-cli -- migrate
//! ```

pub mod banners;
pub mod contact;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod site_content;
pub mod stock_notifications;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use banners::BannerRepository;
pub use contact::ContactRepository;
pub use dashboard::DashboardRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use site_content::SiteContentRepository;
pub use stock_notifications::StockNotificationRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation. Holds the name of the duplicated field.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique violation to `Conflict`, anything else to `Database`.
pub(crate) fn conflict_on_unique(err: sqlx::Error, field: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(field.to_string());
    }
    RepositoryError::Database(err)
}

/// Turn "no row affected" into `NotFound`.
pub(crate) const fn require_affected(rows: u64) -> Result<(), RepositoryError> {
    if rows == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Round-trip a trivial query to check the database is reachable.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be reached.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_affected() {
        assert!(matches!(require_affected(0), Err(RepositoryError::NotFound)));
        assert!(require_affected(1).is_ok());
        assert!(require_affected(3).is_ok());
    }

    #[test]
    fn test_non_unique_errors_stay_database_errors() {
        let err = conflict_on_unique(sqlx::Error::RowNotFound, "SKU");
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
