//! Cart route handlers.
//!
//! The cart lives in the visitor's session until checkout. Every handler
//! loads it, applies one `CartAction` and writes it back.

use axum::extract::{Path, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use loja_core::{Cart, CartAction, CartItem, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::state::AppState;
use crate::validation::ApiJson;

/// Add-to-cart payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: Option<i32>,
    pub quantity: Option<u32>,
}

/// Quantity change payload.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: Option<u32>,
}

/// Cart as returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub item_count: u32,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Read the cart from the session, empty if there is none.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session with a fresh checkout key.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    session
        .insert(session_keys::CHECKOUT_KEY, Uuid::new_v4())
        .await?;
    Ok(())
}

/// Key of the current cart contents. Unchanged until the cart changes.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn checkout_key(session: &Session) -> Result<Uuid> {
    if let Some(key) = session.get::<Uuid>(session_keys::CHECKOUT_KEY).await? {
        return Ok(key);
    }
    let key = Uuid::new_v4();
    session.insert(session_keys::CHECKOUT_KEY, key).await?;
    Ok(key)
}

async fn apply(session: &Session, action: CartAction) -> Result<ApiJson<CartResponse>> {
    let cart = load_cart(session).await?.reduce(action);
    save_cart(session, &cart).await?;
    Ok(ApiJson(CartResponse::from(&cart)))
}

/// Current cart.
///
/// GET /api/cart
#[instrument(skip_all)]
pub async fn show(session: Session) -> Result<ApiJson<CartResponse>> {
    let cart = load_cart(&session).await?;
    Ok(ApiJson(CartResponse::from(&cart)))
}

/// Add units of a product.
///
/// POST /api/cart/items
#[instrument(skip_all, fields(product_id = ?payload.product_id))]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<AddItemRequest>,
) -> Result<ApiJson<CartResponse>> {
    let product_id = payload
        .product_id
        .map(ProductId::new)
        .ok_or_else(|| AppError::BadRequest("O produto é obrigatório".to_string()))?;
    let quantity = payload.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "A quantidade deve ser pelo menos 1".to_string(),
        ));
    }

    let product = ProductRepository::new(state.pool())
        .get_active(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado".to_string()))?;

    if !product.is_in_stock() {
        return Err(AppError::BadRequest("Produto esgotado".to_string()));
    }

    let cart = load_cart(&session).await?;
    let wanted = u64::from(cart.quantity_of(product_id)) + u64::from(quantity);
    if wanted > u64::try_from(product.stock).unwrap_or(0) {
        return Err(AppError::BadRequest(
            "Quantidade indisponível em stock".to_string(),
        ));
    }

    let cart = cart.reduce(CartAction::Add(CartItem::from_product(&product, quantity)));
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", &product_id.to_string())]),
    );
    Ok(ApiJson(CartResponse::from(&cart)))
}

/// Set the quantity of a line. Zero removes it.
///
/// PATCH /api/cart/items/{productId}
#[instrument(skip_all, fields(product_id = %product_id))]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateItemRequest>,
) -> Result<ApiJson<CartResponse>> {
    let product_id = ProductId::new(product_id);
    let quantity = payload
        .quantity
        .ok_or_else(|| AppError::BadRequest("A quantidade é obrigatória".to_string()))?;

    let cart = load_cart(&session).await?;
    if cart.quantity_of(product_id) == 0 {
        return Err(AppError::NotFound(
            "Produto não está no carrinho".to_string(),
        ));
    }

    if quantity > 0 {
        let stock = ProductRepository::new(state.pool())
            .get_active(product_id)
            .await?
            .map_or(0, |product| product.stock);
        if i64::from(quantity) > i64::from(stock) {
            return Err(AppError::BadRequest(
                "Quantidade indisponível em stock".to_string(),
            ));
        }
    }

    let cart = cart.reduce(CartAction::UpdateQuantity {
        product_id,
        quantity,
    });
    save_cart(&session, &cart).await?;
    Ok(ApiJson(CartResponse::from(&cart)))
}

/// Drop a line.
///
/// DELETE /api/cart/items/{productId}
#[instrument(skip_all, fields(product_id = %product_id))]
pub async fn remove_item(
    session: Session,
    Path(product_id): Path<i32>,
) -> Result<ApiJson<CartResponse>> {
    apply(&session, CartAction::Remove(ProductId::new(product_id))).await
}

/// Empty the cart.
///
/// DELETE /api/cart
#[instrument(skip_all)]
pub async fn clear(session: Session) -> Result<ApiJson<CartResponse>> {
    apply(&session, CartAction::Clear).await
}
