//! Database operations for the storefront.
//!
//! # Schema: `shop`
//!
//! Shared with the back office. The storefront reads the catalog and writes
//! customer data:
//!
//! - `user` - Customer accounts
//! - `product`, `banner` - Catalog (read only here)
//! - `customer_order` - Orders placed at checkout
//! - `site_content` - Editable interface copy (read only here)
//! - `contact_message`, `stock_notification` - Visitor submissions
//! - `session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p loja-cli -- migrate
//! ```

pub mod banners;
pub mod contact;
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

use loja_core::ProductId;

pub use banners::BannerRepository;
pub use contact::ContactRepository;
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

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A checkout line asked for more units than are on hand.
    #[error("insufficient stock for product {0}")]
    InsufficientStock(ProductId),
}

/// Map a unique violation to `Conflict`, anything else to `Database`.
pub(crate) fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
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
