//! Back-in-stock requests.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::models::StockNotification;
use loja_core::{Email, ProductId};

use crate::db::{ProductRepository, StockNotificationRepository};
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::state::AppState;
use crate::validation::{ApiJson, optional};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockNotificationRequest {
    pub product_id: Option<i32>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StockNotificationResponse {
    pub notification: StockNotification,
}

/// Ask to be told when a product is back in stock.
///
/// Logged-in customers may omit the email; their account email is used.
/// Repeating a request that is still pending returns the existing one.
///
/// POST /api/stock-notifications
#[instrument(skip_all, fields(product_id = ?payload.product_id))]
pub async fn create(
    State(state): State<AppState>,
    OptionalAuth(current): OptionalAuth,
    ApiJson(payload): ApiJson<StockNotificationRequest>,
) -> Result<impl IntoResponse> {
    let product_id = payload
        .product_id
        .map(ProductId::new)
        .ok_or_else(|| AppError::BadRequest("O produto é obrigatório".to_string()))?;
    let email = match (optional(payload.email), current) {
        (Some(email), _) => {
            Email::parse(&email).map_err(|_| AppError::BadRequest("Email inválido".to_string()))?
        }
        (None, Some(user)) => user.email,
        (None, None) => return Err(AppError::BadRequest("O email é obrigatório".to_string())),
    };

    ProductRepository::new(state.pool())
        .get_active(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado".to_string()))?;

    let (notification, created) = StockNotificationRepository::new(state.pool())
        .request(product_id, &email)
        .await?;

    if created {
        tracing::info!(notification_id = %notification.id, "Stock notification requested");
    }

    Ok((
        StatusCode::CREATED,
        ApiJson(StockNotificationResponse { notification }),
    ))
}
