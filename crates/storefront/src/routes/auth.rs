//! Authentication route handlers.
//!
//! Email and password registration and login. A successful login rotates the
//! session id and stores a `CurrentUser` in the session.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;
use crate::validation::{ApiJson, max_chars, required};

const MAX_NAME_CHARS: usize = 120;

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body returned by register, login and `me`.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Create an account and log it in.
///
/// POST /api/auth/register
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let email = required(payload.email, "O email é obrigatório")?;
    let name = required(payload.name, "O nome é obrigatório")?;
    max_chars(&name, MAX_NAME_CHARS, "nome")?;
    // Passwords are not trimmed
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("A palavra-passe é obrigatória".to_string()))?;

    let user = AuthService::new(state.pool())
        .register(&email, &password, &name)
        .await?;

    set_current_user(&session, &CurrentUser::from(&user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "Customer registered");

    Ok((StatusCode::CREATED, ApiJson(UserResponse { user })))
}

/// Log in with email and password.
///
/// POST /api/auth/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<ApiJson<UserResponse>> {
    let (Some(email), Some(password)) = (
        payload.email.filter(|e| !e.trim().is_empty()),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Email e palavra-passe são obrigatórios".to_string(),
        ));
    };

    let user = AuthService::new(state.pool())
        .login(&email, &password)
        .await
        .inspect_err(|_| tracing::info!("Failed login attempt"))?;

    set_current_user(&session, &CurrentUser::from(&user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "Customer logged in");

    Ok(ApiJson(UserResponse { user }))
}

/// Log out and drop the session.
///
/// POST /api/auth/logout
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

/// The logged-in user, read fresh from the database.
///
/// GET /api/auth/me
#[instrument(skip_all, fields(user_id = %current.user_id))]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
) -> Result<ApiJson<UserResponse>> {
    let Some(user) = crate::db::UserRepository::new(state.pool())
        .get_by_id(current.user_id)
        .await?
    else {
        // Account deleted while the session was alive
        clear_current_user(&session).await?;
        return Err(AppError::Unauthorized("Não autenticado".to_string()));
    };

    Ok(ApiJson(UserResponse { user }))
}
