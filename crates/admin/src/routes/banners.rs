//! Banner management route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::BannerId;
use loja_core::models::Banner;

use crate::db::BannerRepository;
use crate::db::banners::BannerFields;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::validation::{ApiJson, optional, required};

/// Build the banners router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", put(update).delete(destroy))
}

/// Create and update payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
}

impl BannerRequest {
    /// Check the payload and turn it into database fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a missing title or image.
    pub fn validate(self) -> Result<BannerFields> {
        Ok(BannerFields {
            title: required(self.title, "título")?,
            image_url: required(self.image_url, "imagem")?,
            subtitle: optional(self.subtitle),
            link_url: optional(self.link_url),
            position: self.position.unwrap_or(0),
            active: self.active.unwrap_or(true),
        })
    }
}

/// Body returned for a single banner.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub banner: Banner,
}

/// GET /api/admin/banners
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Banner>>> {
    Ok(Json(BannerRepository::new(state.pool()).list().await?))
}

/// POST /api/admin/banners
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BannerRequest>,
) -> Result<(StatusCode, Json<BannerResponse>)> {
    let fields = payload.validate()?;
    let banner = BannerRepository::new(state.pool()).create(&fields).await?;

    tracing::info!(banner_id = %banner.id, "Banner created");
    Ok((StatusCode::CREATED, Json(BannerResponse { banner })))
}

/// PUT /api/admin/banners/{id}
#[instrument(skip_all, fields(admin_id = %admin.user_id, banner_id = id))]
async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<BannerRequest>,
) -> Result<Json<BannerResponse>> {
    let fields = payload.validate()?;
    let banner = BannerRepository::new(state.pool())
        .update(BannerId::new(id), &fields)
        .await?;
    Ok(Json(BannerResponse { banner }))
}

/// DELETE /api/admin/banners/{id}
#[instrument(skip_all, fields(admin_id = %admin.user_id, banner_id = id))]
async fn destroy(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    BannerRepository::new(state.pool())
        .delete(BannerId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
