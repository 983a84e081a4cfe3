//! Authentication route handlers for admin.
//!
//! Password login for accounts carrying the admin flag. A successful login
//! rotates the session id and stores a `CurrentAdmin`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAdmin, RequireAdmin, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AdminAuthService;
use crate::state::AppState;
use crate::validation::{ApiJson, optional};

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body returned by login and `me`.
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub admin: CurrentAdmin,
}

/// Log in with email and password.
///
/// POST /api/admin/login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AdminResponse>> {
    let (Some(email), Some(password)) = (
        optional(payload.email),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Email e palavra-passe são obrigatórios".to_string(),
        ));
    };

    let admin = AdminAuthService::new(state.pool())
        .login(&email, &password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Failed admin login"))?;

    set_current_admin(&session, &admin).await?;
    set_sentry_user(&admin.user_id, Some(admin.email.as_str()));
    tracing::info!(user_id = %admin.user_id, "Admin logged in");

    Ok(Json(AdminResponse { admin }))
}

/// Log out and drop the session.
///
/// POST /api/admin/logout
#[instrument(skip_all)]
async fn logout(session: Session, OptionalAdmin(admin): OptionalAdmin) -> Result<StatusCode> {
    clear_current_admin(&session).await?;
    clear_sentry_user();

    if let Some(admin) = admin {
        tracing::info!(user_id = %admin.user_id, "Admin logged out");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// The logged-in admin.
///
/// GET /api/admin/me
#[instrument(skip_all, fields(user_id = %admin.user_id))]
async fn me(RequireAdmin(admin): RequireAdmin) -> Json<AdminResponse> {
    Json(AdminResponse { admin })
}
