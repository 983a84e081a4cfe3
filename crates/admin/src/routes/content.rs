//! Site content editing route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::models::SiteContent;

use crate::db::SiteContentRepository;
use crate::db::site_content::{ContentFields, is_valid_key};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::validation::{ApiJson, optional, required};

/// Build the content router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{key}", put(upsert).delete(destroy))
}

/// Upsert payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    pub value_pt: Option<String>,
    pub value_en: Option<String>,
    pub description: Option<String>,
}

impl ContentRequest {
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when the Portuguese value is blank.
    pub fn validate(self) -> Result<ContentFields> {
        Ok(ContentFields {
            value_pt: required(self.value_pt, "valor (PT)")?,
            value_en: optional(self.value_en),
            description: optional(self.description),
        })
    }
}

/// Body returned for a single entry.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub content: SiteContent,
}

fn validate_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Chave inválida: {key}")))
    }
}

/// GET /api/admin/content
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<SiteContent>>> {
    Ok(Json(SiteContentRepository::new(state.pool()).list().await?))
}

/// Create or replace an entry.
///
/// PUT /api/admin/content/{key}
#[instrument(skip_all, fields(admin_id = %admin.user_id, key = %key))]
async fn upsert(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    ApiJson(payload): ApiJson<ContentRequest>,
) -> Result<Json<ContentResponse>> {
    validate_key(&key)?;
    let fields = payload.validate()?;

    let content = SiteContentRepository::new(state.pool())
        .upsert(&key, &fields)
        .await?;

    tracing::info!("Site content saved");
    Ok(Json(ContentResponse { content }))
}

/// DELETE /api/admin/content/{key}
#[instrument(skip_all, fields(admin_id = %admin.user_id, key = %key))]
async fn destroy(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    SiteContentRepository::new(state.pool()).delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_message() {
        assert!(validate_key("home.title").is_ok());
        assert!(matches!(
            validate_key("Home Title"),
            Err(AppError::BadRequest(msg)) if msg == "Chave inválida: Home Title"
        ));
    }

    #[test]
    fn test_content_requires_portuguese_value() {
        assert!(ContentRequest::default().validate().is_err());

        let fields = ContentRequest {
            value_pt: Some("Bem-vindo".into()),
            value_en: Some("".into()),
            description: None,
        }
        .validate()
        .ok();
        assert_eq!(fields.map(|f| f.value_en), Some(None));
    }
}
