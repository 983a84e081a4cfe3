//! Back-in-stock request route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::models::StockNotification;
use loja_core::{ProductId, StockNotificationId};

use crate::db::StockNotificationRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the stock notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{id}/notified", patch(mark_notified))
        .route("/{id}", delete(destroy))
        .route(
            "/products/{product_id}/notified",
            post(mark_product_notified),
        )
}

/// Query parameters for the list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub pending: bool,
}

/// Result of a bulk update.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub updated: u64,
}

/// GET /api/admin/stock-notifications
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<StockNotification>>> {
    let notifications = StockNotificationRepository::new(state.pool())
        .list(query.pending)
        .await?;
    Ok(Json(notifications))
}

/// PATCH /api/admin/stock-notifications/{id}/notified
#[instrument(skip_all, fields(admin_id = %admin.user_id, notification_id = id))]
async fn mark_notified(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StockNotification>> {
    let notification = StockNotificationRepository::new(state.pool())
        .mark_notified(StockNotificationId::new(id))
        .await?;
    Ok(Json(notification))
}

/// Mark every pending request for a product, typically after a restock.
///
/// POST /api/admin/stock-notifications/products/{productId}/notified
#[instrument(skip_all, fields(admin_id = %admin.user_id, product_id = product_id))]
async fn mark_product_notified(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<BulkResponse>> {
    let updated = StockNotificationRepository::new(state.pool())
        .mark_product_notified(ProductId::new(product_id))
        .await?;

    tracing::info!(updated, "Stock notifications marked notified");
    Ok(Json(BulkResponse { updated }))
}

/// DELETE /api/admin/stock-notifications/{id}
#[instrument(skip_all, fields(admin_id = %admin.user_id, notification_id = id))]
async fn destroy(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    StockNotificationRepository::new(state.pool())
        .delete(StockNotificationId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
