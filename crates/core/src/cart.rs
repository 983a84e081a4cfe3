//! Reducer-style shopping cart.
//!
//! The cart is plain state plus a set of actions. The storefront keeps one
//! per visitor inside the session record and only turns it into rows when an
//! order is placed.
//!
//! ```
//! use loja_core::{Cart, CartAction, CartItem, ProductId};
//! use rust_decimal::Decimal;
//!
//! let item = CartItem {
//!     product_id: ProductId::new(1),
//!     name: "Vaporizador".to_string(),
//!     sku: "VAP-1".to_string(),
//!     price: Decimal::new(4990, 2),
//!     quantity: 2,
//!     image_url: None,
//! };
//!
//! let cart = Cart::default().reduce(CartAction::Add(item));
//! assert_eq!(cart.total(), Decimal::new(9980, 2));
//!
//! let cart = cart.reduce(CartAction::Remove(ProductId::new(1)));
//! assert!(cart.is_empty());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{OrderItem, Product};
use crate::types::ProductId;

/// Upper bound for the quantity of a single cart line.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// A product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    /// Unit price at the time the product was added.
    pub price: Decimal,
    pub quantity: u32,
    pub image_url: Option<String>,
}

impl CartItem {
    /// Build a line from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
            quantity,
            image_url: product.image_url.clone(),
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Something the shopper did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add units of a product. Merges with an existing line.
    Add(CartItem),
    /// Drop a product's line entirely.
    Remove(ProductId),
    /// Set the quantity of a line. Zero removes the line.
    UpdateQuantity { product_id: ProductId, quantity: u32 },
    /// Empty the cart.
    Clear,
}

/// Cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of `price × quantity` over every line.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Units of a product already in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Apply an action in place.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add(item) => self.add(item),
            CartAction::Remove(product_id) => {
                self.items.retain(|item| item.product_id != product_id);
            }
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.update_quantity(product_id, quantity),
            CartAction::Clear => self.items.clear(),
        }
    }

    /// Apply an action and return the new state.
    #[must_use]
    pub fn reduce(mut self, action: CartAction) -> Self {
        self.apply(action);
        self
    }

    /// Snapshot the lines for an order.
    #[must_use]
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id,
                name: item.name.clone(),
                sku: item.sku.clone(),
                price: item.price,
                quantity: item.quantity,
            })
            .collect()
    }

    fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            let quantity = existing.quantity.saturating_add(item.quantity);
            // Refresh the snapshot with the latest catalog data
            *existing = CartItem {
                quantity: quantity.min(MAX_LINE_QUANTITY),
                ..item
            };
        } else {
            let quantity = item.quantity.min(MAX_LINE_QUANTITY);
            self.items.push(CartItem { quantity, ..item });
        }
    }

    fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.items.retain(|item| item.product_id != product_id);
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = quantity.min(MAX_LINE_QUANTITY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: format!("Produto {id}"),
            sku: format!("SKU-{id}"),
            price: Decimal::new(cents, 2),
            quantity,
            image_url: None,
        }
    }

    #[test]
    fn test_total_is_sum_of_price_times_quantity() {
        let cart = Cart::default()
            .reduce(CartAction::Add(item(1, 1999, 2)))
            .reduce(CartAction::Add(item(2, 550, 3)))
            .reduce(CartAction::Add(item(3, 1, 7)));

        // 2 × 19.99 + 3 × 5.50 + 7 × 0.01
        assert_eq!(cart.total(), Decimal::new(5655, 2));
        assert_eq!(cart.item_count(), 12);
    }

    #[test]
    fn test_total_has_no_float_drift() {
        let cart = Cart::default().reduce(CartAction::Add(item(1, 10, 3)));
        assert_eq!(cart.total(), Decimal::new(30, 2));
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_removing_last_item_empties_cart() {
        let cart = Cart::default()
            .reduce(CartAction::Add(item(1, 1000, 1)))
            .reduce(CartAction::Remove(ProductId::new(1)));

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_add_merges_same_product() {
        let cart = Cart::default()
            .reduce(CartAction::Add(item(1, 1000, 1)))
            .reduce(CartAction::Add(item(1, 1200, 2)));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 3);
        // Latest price wins
        assert_eq!(cart.total(), Decimal::new(3600, 2));
    }

    #[test]
    fn test_add_clamps_quantity() {
        let cart = Cart::default()
            .reduce(CartAction::Add(item(1, 100, 90)))
            .reduce(CartAction::Add(item(1, 100, 90)));

        assert_eq!(cart.quantity_of(ProductId::new(1)), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let cart = Cart::default().reduce(CartAction::Add(item(1, 100, 0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let cart = Cart::default()
            .reduce(CartAction::Add(item(1, 250, 1)))
            .reduce(CartAction::UpdateQuantity {
                product_id: ProductId::new(1),
                quantity: 4,
            });

        assert_eq!(cart.total(), Decimal::new(1000, 2));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let cart = Cart::default()
            .reduce(CartAction::Add(item(1, 250, 1)))
            .reduce(CartAction::Add(item(2, 250, 1)))
            .reduce(CartAction::UpdateQuantity {
                product_id: ProductId::new(1),
                quantity: 0,
            });

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 0);
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let before = Cart::default().reduce(CartAction::Add(item(1, 250, 1)));
        let after = before.clone().reduce(CartAction::UpdateQuantity {
            product_id: ProductId::new(9),
            quantity: 3,
        });
        assert_eq!(before, after);
    }

    #[test]
    fn test_clear() {
        let cart = Cart::default()
            .reduce(CartAction::Add(item(1, 250, 1)))
            .reduce(CartAction::Add(item(2, 250, 1)))
            .reduce(CartAction::Clear);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_to_order_items_keeps_lines() {
        let cart = Cart::default()
            .reduce(CartAction::Add(item(1, 250, 2)))
            .reduce(CartAction::Add(item(2, 100, 1)));

        let items = cart.to_order_items();
        assert_eq!(items.len(), 2);
        let total: Decimal = items.iter().map(OrderItem::line_total).sum();
        assert_eq!(total, cart.total());
    }
}
