//! Checkout and order history.
//!
//! Placing an order reserves stock, records a `pending` order with a
//! snapshot of the cart, and empties the cart. There is no payment step.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use loja_core::OrderId;
use loja_core::models::{Order, ShippingDetails};

use crate::db::orders::NewOrder;
use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::routes::cart::{checkout_key, load_cart, save_cart};
use crate::state::AppState;
use crate::validation::{ApiJson, max_chars, optional, required};

const MAX_FIELD_CHARS: usize = 200;
const MAX_NOTES_CHARS: usize = 2000;

/// Shipping address as submitted at checkout.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
}

impl ShippingRequest {
    /// Validate into the stored shipping snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a missing or oversized field.
    pub fn validate(self) -> Result<ShippingDetails> {
        let details = ShippingDetails {
            name: required(self.name, "O nome de envio é obrigatório")?,
            address: required(self.address, "A morada de envio é obrigatória")?,
            city: required(self.city, "A cidade é obrigatória")?,
            postal_code: required(self.postal_code, "O código postal é obrigatório")?,
            phone: optional(self.phone),
        };

        max_chars(&details.name, MAX_FIELD_CHARS, "nome")?;
        max_chars(&details.address, MAX_FIELD_CHARS, "morada")?;
        max_chars(&details.city, MAX_FIELD_CHARS, "cidade")?;
        max_chars(&details.postal_code, MAX_FIELD_CHARS, "código postal")?;
        if let Some(phone) = &details.phone {
            max_chars(phone, MAX_FIELD_CHARS, "telefone")?;
        }

        Ok(details)
    }
}

/// Checkout payload.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub shipping: ShippingRequest,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

/// Place an order from the session cart.
///
/// POST /api/orders
#[instrument(skip_all, fields(user_id = %current.user_id))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    ApiJson(payload): ApiJson<PlaceOrderRequest>,
) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("O carrinho está vazio".to_string()));
    }

    let shipping = payload.shipping.validate()?;
    let notes = optional(payload.notes);
    if let Some(notes) = &notes {
        max_chars(notes, MAX_NOTES_CHARS, "notas")?;
    }

    let checkout_key = checkout_key(&session).await?;
    let order = OrderRepository::new(state.pool())
        .place(&NewOrder {
            user_id: current.user_id,
            checkout_key,
            items: cart.to_order_items(),
            shipping,
            notes,
        })
        .await
        .map_err(|e| match e {
            // A concurrent checkout of the same cart got there first
            RepositoryError::Conflict(_) => {
                AppError::BadRequest("Esta encomenda já foi registada".to_string())
            }
            other => AppError::Database(other),
        })?;

    save_cart(&session, &cart.reduce(loja_core::CartAction::Clear)).await?;

    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_id", &order.id.to_string())]),
    );

    Ok((StatusCode::CREATED, ApiJson(OrderResponse { order })))
}

/// Orders of the logged-in user, newest first.
///
/// GET /api/orders
#[instrument(skip_all, fields(user_id = %current.user_id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<ApiJson<OrdersResponse>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(current.user_id)
        .await?;

    Ok(ApiJson(OrdersResponse { orders }))
}

/// One of the user's orders.
///
/// GET /api/orders/{id}
#[instrument(skip_all, fields(user_id = %current.user_id, order_id = id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    Path(id): Path<i32>,
) -> Result<ApiJson<OrderResponse>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(OrderId::new(id), current.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Encomenda não encontrada".to_string()))?;

    Ok(ApiJson(OrderResponse { order }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipping() -> ShippingRequest {
        ShippingRequest {
            name: Some(" Maria Costa ".to_string()),
            address: Some("Rua das Flores 12".to_string()),
            city: Some("Lisboa".to_string()),
            postal_code: Some("1200-195".to_string()),
            phone: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_shipping_validate_trims() {
        let details = shipping().validate().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(details.name, "Maria Costa");
        assert_eq!(details.phone, None);
    }

    #[test]
    fn test_shipping_requires_address() {
        let request = ShippingRequest {
            address: None,
            ..shipping()
        };
        assert!(matches!(request.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_shipping_rejects_oversized_field() {
        let request = ShippingRequest {
            city: Some("x".repeat(MAX_FIELD_CHARS + 1)),
            ..shipping()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_shipping_defaults_to_empty() {
        let payload: PlaceOrderRequest =
            serde_json::from_str(r#"{"notes":"deixar na portaria"}"#)
                .unwrap_or_else(|e| panic!("{e}"));
        assert!(payload.shipping.validate().is_err());
    }
}
