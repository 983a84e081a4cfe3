//! Authentication extractors for admin.
//!
//! Provides extractors for requiring admin authentication in route handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::{CurrentAdmin, session_keys};
use crate::state::AppState;

/// Message for requests without an admin session.
pub const NOT_AUTHENTICATED: &str = "Não autenticado";

/// Message for sessions whose account lost the admin flag.
pub const NOT_ADMIN: &str = "Acesso reservado a administradores";

/// Extractor that requires a logged-in administrator.
///
/// The session only proves who logged in. The admin flag is read from the
/// database on every request, so demoting an account locks it out at once.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Olá, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = || AppError::Unauthorized(NOT_AUTHENTICATED.to_string());

        // Set by SessionManagerLayer
        let session = parts.extensions.get::<Session>().ok_or_else(unauthorized)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(unauthorized)?;

        match UserRepository::new(state.pool()).is_admin(admin.user_id).await? {
            Some(true) => Ok(Self(admin)),
            Some(false) => {
                tracing::warn!(user_id = %admin.user_id, "Demoted admin rejected");
                Err(AppError::Forbidden(NOT_ADMIN.to_string()))
            }
            None => {
                session.flush().await?;
                Err(unauthorized())
            }
        }
    }
}

/// Extractor that optionally gets the admin stored in the session.
///
/// Does not consult the database; use `RequireAdmin` to guard handlers.
pub struct OptionalAdmin(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdmin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(admin))
    }
}

/// Log an admin in: rotate the session id, then store the identity.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Log the admin out.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
