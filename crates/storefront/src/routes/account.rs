//! Account route handlers (require login).

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::ProfileUpdate;
use crate::routes::auth::UserResponse;
use crate::services::auth::AuthService;
use crate::state::AppState;
use crate::validation::{ApiJson, max_chars};

const MAX_FIELD_CHARS: usize = 200;

/// Password change payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Account overview.
///
/// GET /api/account
#[instrument(skip_all, fields(user_id = %current.user_id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<ApiJson<UserResponse>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(current.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Não autenticado".to_string()))?;

    Ok(ApiJson(UserResponse { user }))
}

/// Update name, phone and address.
///
/// PUT /api/account/profile
#[instrument(skip_all, fields(user_id = %current.user_id))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    ApiJson(payload): ApiJson<ProfileUpdate>,
) -> Result<ApiJson<UserResponse>> {
    let update = payload.normalized();

    for (field, value) in [
        ("nome", &update.name),
        ("telefone", &update.phone),
        ("morada", &update.address),
        ("cidade", &update.city),
        ("código postal", &update.postal_code),
        ("país", &update.country),
    ] {
        if let Some(value) = value {
            max_chars(value, MAX_FIELD_CHARS, field)?;
        }
    }

    let user = UserRepository::new(state.pool())
        .update_profile(current.user_id, &update)
        .await?;

    tracing::info!("Profile updated");
    Ok(ApiJson(UserResponse { user }))
}

/// Change password after confirming the current one.
///
/// PUT /api/account/password
#[instrument(skip_all, fields(user_id = %current.user_id))]
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode> {
    let (Some(current_password), Some(new_password)) = (
        payload.current_password.filter(|p| !p.is_empty()),
        payload.new_password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "A palavra-passe atual e a nova são obrigatórias".to_string(),
        ));
    };

    AuthService::new(state.pool())
        .change_password(current.user_id, &current_password, &new_password)
        .await?;

    tracing::info!("Password changed");
    Ok(StatusCode::NO_CONTENT)
}
