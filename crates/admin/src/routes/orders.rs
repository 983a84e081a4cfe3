//! Order management route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::db::orders::AdminOrder;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::validation::{ApiJson, optional};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{id}", get(show))
        .route("/{id}/status", patch(update_status))
        .route("/{id}/tracking", patch(update_tracking))
}

/// Query parameters for the order list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Status change payload.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

/// Tracking number payload. Blank clears it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRequest {
    pub tracking_number: Option<String>,
}

/// Body returned for a single order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: AdminOrder,
}

fn parse_status(raw: Option<String>) -> Result<Option<OrderStatus>> {
    optional(raw)
        .map(|s| {
            s.parse::<OrderStatus>()
                .map_err(|_| AppError::BadRequest(format!("Estado inválido: {s}")))
        })
        .transpose()
}

/// Every order, optionally narrowed to one status.
///
/// GET /api/admin/orders
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AdminOrder>>> {
    let status = parse_status(query.status)?;
    let orders = OrderRepository::new(state.pool()).list(status).await?;
    Ok(Json(orders))
}

/// GET /api/admin/orders/{id}
#[instrument(skip_all, fields(admin_id = %admin.user_id, order_id = id))]
async fn show(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>> {
    let order = OrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Encomenda não encontrada".to_string()))?;
    Ok(Json(OrderResponse { order }))
}

/// Move an order to any status.
///
/// PATCH /api/admin/orders/{id}/status
#[instrument(skip_all, fields(admin_id = %admin.user_id, order_id = id))]
async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<StatusRequest>,
) -> Result<Json<OrderResponse>> {
    let status = parse_status(payload.status)?
        .ok_or_else(|| AppError::BadRequest("O campo estado é obrigatório".to_string()))?;

    let order = OrderRepository::new(state.pool())
        .update_status(OrderId::new(id), status)
        .await?;

    tracing::info!(status = %status, "Order status changed");
    Ok(Json(OrderResponse { order }))
}

/// PATCH /api/admin/orders/{id}/tracking
#[instrument(skip_all, fields(admin_id = %admin.user_id, order_id = id))]
async fn update_tracking(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<TrackingRequest>,
) -> Result<Json<OrderResponse>> {
    let tracking_number = optional(payload.tracking_number);

    let order = OrderRepository::new(state.pool())
        .update_tracking(OrderId::new(id), tracking_number.as_deref())
        .await?;
    Ok(Json(OrderResponse { order }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(None).ok(), Some(None));
        assert_eq!(parse_status(Some(" ".into())).ok(), Some(None));
        assert_eq!(
            parse_status(Some("shipped".into())).ok(),
            Some(Some(OrderStatus::Shipped))
        );
        assert!(matches!(
            parse_status(Some("lost".into())),
            Err(AppError::BadRequest(msg)) if msg == "Estado inválido: lost"
        ));
    }
}
