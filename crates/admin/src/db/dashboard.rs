//! Counters for the dashboard.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::PgPool;

use loja_core::OrderStatus;

use super::RepositoryError;

/// Products at or below this many units count as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// Dashboard counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub products: i64,
    pub low_stock_products: i64,
    /// Every status is present, zero when no order has it.
    pub orders_by_status: BTreeMap<OrderStatus, i64>,
    pub unread_messages: i64,
    pub pending_stock_notifications: i64,
}

#[derive(sqlx::FromRow)]
struct CountsRow {
    products: i64,
    low_stock_products: i64,
    unread_messages: i64,
    pending_stock_notifications: i64,
}

/// Repository for aggregate counts.
pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Gather every counter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let counts = sqlx::query_as::<_, CountsRow>(
            r"
            SELECT
                (SELECT COUNT(*) FROM shop.product) AS products,
                (SELECT COUNT(*) FROM shop.product WHERE stock <= $1) AS low_stock_products,
                (SELECT COUNT(*) FROM shop.contact_message WHERE NOT read) AS unread_messages,
                (SELECT COUNT(*) FROM shop.stock_notification WHERE NOT notified)
                    AS pending_stock_notifications
            ",
        )
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_one(self.pool)
        .await?;

        let by_status = sqlx::query_as::<_, (OrderStatus, i64)>(
            "SELECT status, COUNT(*) FROM shop.customer_order GROUP BY status",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(DashboardStats {
            products: counts.products,
            low_stock_products: counts.low_stock_products,
            orders_by_status: status_counts(by_status),
            unread_messages: counts.unread_messages,
            pending_stock_notifications: counts.pending_stock_notifications,
        })
    }
}

fn status_counts(rows: Vec<(OrderStatus, i64)>) -> BTreeMap<OrderStatus, i64> {
    let mut counts: BTreeMap<OrderStatus, i64> =
        OrderStatus::ALL.iter().map(|status| (*status, 0)).collect();
    counts.extend(rows);
    counts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_fill_missing_statuses() {
        let counts = status_counts(vec![(OrderStatus::Pending, 3), (OrderStatus::Shipped, 1)]);

        assert_eq!(counts.len(), OrderStatus::ALL.len());
        assert_eq!(counts[&OrderStatus::Pending], 3);
        assert_eq!(counts[&OrderStatus::Shipped], 1);
        assert_eq!(counts[&OrderStatus::Cancelled], 0);
    }

    #[test]
    fn test_stats_serialize_status_names() {
        let stats = DashboardStats {
            products: 10,
            low_stock_products: 2,
            orders_by_status: status_counts(vec![(OrderStatus::Delivered, 4)]),
            unread_messages: 1,
            pending_stock_notifications: 0,
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["lowStockProducts"], 2);
        assert_eq!(json["ordersByStatus"]["delivered"], 4);
        assert_eq!(json["ordersByStatus"]["returned"], 0);
    }
}
