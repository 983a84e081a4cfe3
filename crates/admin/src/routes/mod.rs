//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                          - Liveness
//! GET    /health/ready                                    - Readiness (database ping)
//!
//! # Auth
//! POST   /api/admin/login                                 - Password login (admin flag required)
//! POST   /api/admin/logout                                - Logout
//! GET    /api/admin/me                                    - Current admin
//!
//! # Everything below requires an admin session
//! GET    /api/admin/dashboard                             - Counters
//!
//! GET    /api/admin/products                              - List (?q= name/SKU)
//! POST   /api/admin/products                              - Create
//! GET    /api/admin/products/{id}                         - Detail
//! PUT    /api/admin/products/{id}                         - Replace
//! DELETE /api/admin/products/{id}                         - Delete
//!
//! GET    /api/admin/banners                               - List
//! POST   /api/admin/banners                               - Create
//! PUT    /api/admin/banners/{id}                          - Replace
//! DELETE /api/admin/banners/{id}                          - Delete
//!
//! GET    /api/admin/orders                                - List (?status=)
//! GET    /api/admin/orders/{id}                           - Detail
//! PATCH  /api/admin/orders/{id}/status                    - Set status
//! PATCH  /api/admin/orders/{id}/tracking                  - Set tracking number
//!
//! GET    /api/admin/content                               - List
//! PUT    /api/admin/content/{key}                         - Upsert
//! DELETE /api/admin/content/{key}                         - Delete
//!
//! GET    /api/admin/messages                              - Inbox (?unread=true)
//! PATCH  /api/admin/messages/{id}/read                    - Mark read
//! DELETE /api/admin/messages/{id}                         - Delete
//!
//! GET    /api/admin/stock-notifications                   - List (?pending=true)
//! PATCH  /api/admin/stock-notifications/{id}/notified     - Mark one notified
//! POST   /api/admin/stock-notifications/products/{id}/notified - Mark a product's pending requests
//! DELETE /api/admin/stock-notifications/{id}              - Delete
//!
//! GET    /api/admin/users                                 - List accounts
//! PATCH  /api/admin/users/{id}/admin                      - Grant/revoke admin flag
//! ```

pub mod auth;
pub mod banners;
pub mod content;
pub mod dashboard;
pub mod messages;
pub mod orders;
pub mod products;
pub mod stock_notifications;
pub mod users;

use axum::{Router, extract::State, http::StatusCode, middleware::from_fn, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create all `/api/admin` routes.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .merge(auth::router())
        .nest("/dashboard", dashboard::router())
        .nest("/products", products::router())
        .nest("/banners", banners::router())
        .nest("/orders", orders::router())
        .nest("/content", content::router())
        .nest("/messages", messages::router())
        .nest("/stock-notifications", stock_notifications::router())
        .nest("/users", users::router());

    Router::new().nest("/api/admin", api)
}

/// Build the full application: health checks, API routes and middleware.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.pool(), state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint. 503 when the database is unreachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match crate::db::ping(state.pool()).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
