//! Contact message inbox route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch},
};
use serde::Deserialize;
use tracing::instrument;

use loja_core::ContactMessageId;
use loja_core::models::ContactMessage;

use crate::db::ContactRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the messages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{id}/read", patch(mark_read))
        .route("/{id}", delete(destroy))
}

/// Query parameters for the inbox.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub unread: bool,
}

/// GET /api/admin/messages
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ContactMessage>>> {
    let messages = ContactRepository::new(state.pool())
        .list(query.unread)
        .await?;
    Ok(Json(messages))
}

/// PATCH /api/admin/messages/{id}/read
#[instrument(skip_all, fields(admin_id = %admin.user_id, message_id = id))]
async fn mark_read(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContactMessage>> {
    let message = ContactRepository::new(state.pool())
        .mark_read(ContactMessageId::new(id))
        .await?;
    Ok(Json(message))
}

/// DELETE /api/admin/messages/{id}
#[instrument(skip_all, fields(admin_id = %admin.user_id, message_id = id))]
async fn destroy(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    ContactRepository::new(state.pool())
        .delete(ContactMessageId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
