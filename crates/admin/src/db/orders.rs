//! Order management.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use loja_core::models::{Order, OrderItem, ShippingDetails};
use loja_core::{OrderId, OrderStatus, UserId};

use super::RepositoryError;

const ORDER_COLUMNS: &str = "o.id, o.user_id, o.items, o.total, o.status, o.shipping_name, \
                             o.shipping_address, o.shipping_city, o.shipping_postal_code, \
                             o.shipping_phone, o.notes, o.tracking_number, o.created_at, \
                             o.updated_at, u.email AS customer_email";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    items: Json<Vec<OrderItem>>,
    total: Decimal,
    status: OrderStatus,
    shipping_name: String,
    shipping_address: String,
    shipping_city: String,
    shipping_postal_code: String,
    shipping_phone: Option<String>,
    notes: Option<String>,
    tracking_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_email: String,
}

/// An order together with the email of the account that placed it.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    #[serde(flatten)]
    pub order: Order,
    pub customer_email: String,
}

impl From<OrderRow> for AdminOrder {
    fn from(row: OrderRow) -> Self {
        Self {
            order: Order {
                id: row.id,
                user_id: row.user_id,
                items: row.items.0,
                total: row.total,
                status: row.status,
                shipping: ShippingDetails {
                    name: row.shipping_name,
                    address: row.shipping_address,
                    city: row.shipping_city,
                    postal_code: row.shipping_postal_code,
                    phone: row.shipping_phone,
                },
                notes: row.notes,
                tracking_number: row.tracking_number,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            customer_email: row.customer_email,
        }
    }
}

/// Repository for orders across all customers.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All orders, newest first, optionally only those in one status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<AdminOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM shop.customer_order o
            JOIN shop."user" u ON u.id = o.user_id
            WHERE $1::shop.order_status IS NULL OR o.status = $1
            ORDER BY o.created_at DESC, o.id DESC
            "#
        ))
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(AdminOrder::from).collect())
    }

    /// A single order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<AdminOrder>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM shop.customer_order o
            JOIN shop."user" u ON u.id = o.user_id
            WHERE o.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(AdminOrder::from))
    }

    /// Set the status. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<AdminOrder, RepositoryError> {
        sqlx::query("UPDATE shop.customer_order SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(self.pool)
            .await?;

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Set or clear the carrier tracking number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_tracking(
        &self,
        id: OrderId,
        tracking_number: Option<&str>,
    ) -> Result<AdminOrder, RepositoryError> {
        sqlx::query(
            "UPDATE shop.customer_order SET tracking_number = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(tracking_number)
        .execute(self.pool)
        .await?;

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }
}
