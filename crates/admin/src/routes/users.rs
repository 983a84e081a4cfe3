//! Account administration route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::UserId;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::UserSummary;
use crate::state::AppState;
use crate::validation::ApiJson;

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{id}/admin", patch(set_admin))
}

/// Admin flag payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminFlagRequest {
    pub is_admin: Option<bool>,
}

/// Body returned for a single account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserSummary,
}

/// GET /api/admin/users
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>> {
    Ok(Json(UserRepository::new(state.pool()).list().await?))
}

/// Grant or revoke back-office access. Admins cannot demote themselves.
///
/// PATCH /api/admin/users/{id}/admin
#[instrument(skip_all, fields(admin_id = %admin.user_id, user_id = id))]
async fn set_admin(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<AdminFlagRequest>,
) -> Result<Json<UserResponse>> {
    let is_admin = payload
        .is_admin
        .ok_or_else(|| AppError::BadRequest("O campo isAdmin é obrigatório".to_string()))?;
    let target = UserId::new(id);

    if target == admin.user_id && !is_admin {
        return Err(AppError::BadRequest(
            "Não pode remover o seu próprio acesso de administrador".to_string(),
        ));
    }

    let user = UserRepository::new(state.pool())
        .set_admin(target, is_admin)
        .await?;

    tracing::info!(is_admin, "Admin flag changed");
    Ok(Json(UserResponse { user }))
}
