//! Domain entities shared by the storefront and the back office.
//!
//! Flat rows derive `sqlx::FromRow` under the `postgres` feature and read
//! straight out of the `shop` schema. `Order` carries a JSONB snapshot, so
//! each server assembles it from its own row type.
//!
//! All entities serialize with camelCase keys, which is what the JSON API
//! returns.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    BannerId, ContactMessageId, Locale, OrderId, OrderStatus, Price, ProductId,
    StockNotificationId, UserId,
};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in euros.
    pub price: Decimal,
    /// Units on hand, never negative (`CHECK (stock >= 0)`).
    pub stock: i32,
    pub category: String,
    /// Stock keeping unit, unique across the catalog.
    pub sku: String,
    pub image_url: Option<String>,
    /// Inactive products are hidden from the storefront.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether at least one unit can be sold.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Unit price with currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::eur(self.price)
    }
}

/// A home page banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    /// Display order, ascending.
    pub position: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An editable piece of interface copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    /// Unique key referenced by the frontend (e.g. `home.hero.title`).
    pub key: String,
    pub value_pt: String,
    pub value_en: Option<String>,
    /// Note for editors describing where the text appears.
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SiteContent {
    /// The value in the requested language, falling back to Portuguese when
    /// no translation exists.
    #[must_use]
    pub fn value_for(&self, locale: Locale) -> &str {
        match (locale, self.value_en.as_deref()) {
            (Locale::En, Some(en)) if !en.trim().is_empty() => en,
            _ => &self.value_pt,
        }
    }
}

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A request to be told when an out-of-stock product is back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct StockNotification {
    pub id: StockNotificationId,
    pub product_id: ProductId,
    pub email: String,
    pub notified: bool,
    pub created_at: DateTime<Utc>,
    pub notified_at: Option<DateTime<Utc>>,
}

/// One line of an order, copied from the cart at checkout.
///
/// Later catalog edits do not change past orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: Option<String>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping: ShippingDetails,
    pub notes: Option<String>,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
