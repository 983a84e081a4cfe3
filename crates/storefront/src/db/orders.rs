//! Order placement and history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use loja_core::models::{Order, OrderItem, ShippingDetails};
use loja_core::{OrderId, OrderStatus, UserId};

use super::{RepositoryError, conflict_on_unique};

const ORDER_COLUMNS: &str = "id, user_id, items, total, status, shipping_name, \
                                        shipping_address, shipping_city, shipping_postal_code, \
                                        shipping_phone, notes, tracking_number, created_at, \
                                        updated_at";

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
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
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
        }
    }
}

/// Everything needed to place an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    /// Identifies the cart contents; a second order for the same key is refused.
    pub checkout_key: Uuid,
    /// Cart lines. Prices are replaced by the catalog price at placement.
    pub items: Vec<OrderItem>,
    pub shipping: ShippingDetails,
    pub notes: Option<String>,
}

/// Sum of every line.
#[must_use]
pub fn order_total(items: &[OrderItem]) -> Decimal {
    items.iter().map(OrderItem::line_total).sum()
}

/// Repository for customer orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reserve stock for every line and insert a `pending` order.
    ///
    /// Runs in one transaction: either all lines are decremented and the
    /// order exists, or nothing changes. Lines are priced at the catalog
    /// price read while reserving, not the price held in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InsufficientStock` if a line asks for more
    /// units than are on hand, or its product is gone or inactive.
    /// Returns `RepositoryError::Conflict` if an order already exists for
    /// the checkout key.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn place(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let quantity = i32::try_from(item.quantity)
                .map_err(|_| RepositoryError::InsufficientStock(item.product_id))?;

            let price: Option<Decimal> = sqlx::query_scalar(
                r"
                UPDATE shop.product
                SET stock = stock - $2, updated_at = NOW()
                WHERE id = $1 AND active AND stock >= $2
                RETURNING price
                ",
            )
            .bind(item.product_id)
            .bind(quantity)
            .fetch_optional(&mut *tx)
            .await?;

            let price = price.ok_or(RepositoryError::InsufficientStock(item.product_id))?;
            if price != item.price {
                tracing::info!(
                    product_id = %item.product_id,
                    cart_price = %item.price,
                    price = %price,
                    "Cart price out of date, using catalog price"
                );
            }
            items.push(OrderItem {
                price,
                ..item.clone()
            });
        }

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            INSERT INTO shop.customer_order (
                user_id, items, total, status,
                shipping_name, shipping_address, shipping_city, shipping_postal_code,
                shipping_phone, notes, checkout_key
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(order.user_id)
        .bind(Json(&items))
        .bind(order_total(&items))
        .bind(OrderStatus::Pending)
        .bind(&order.shipping.name)
        .bind(&order.shipping.address)
        .bind(&order.shipping.city)
        .bind(&order.shipping.postal_code)
        .bind(order.shipping.phone.as_deref())
        .bind(order.notes.as_deref())
        .bind(order.checkout_key)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "order for this cart"))?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Orders of one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM shop.customer_order
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// A single order, only if it belongs to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        id: OrderId,
        user_id: UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.customer_order WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Order::from))
    }
}

#[cfg(test)]
mod tests {
    use loja_core::ProductId;

    use super::*;

    fn line(price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(1),
            name: "Bateria 18650".to_string(),
            sku: "BAT-18650".to_string(),
            price: Decimal::new(price, 2),
            quantity,
        }
    }

    #[test]
    fn test_order_total() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
        assert_eq!(
            order_total(&[line(1999, 2), line(450, 1)]),
            Decimal::new(4448, 2)
        );
    }
}
