//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness
//! GET    /health/ready                - Readiness (database ping)
//!
//! # Auth (rate limited)
//! POST   /api/auth/register           - Create account and log in
//! POST   /api/auth/login              - Log in
//! POST   /api/auth/logout             - Log out
//! GET    /api/auth/me                 - Current user
//!
//! # Account (requires auth)
//! GET    /api/account                 - Account overview
//! PUT    /api/account/profile         - Update profile
//! PUT    /api/account/password        - Change password
//!
//! # Catalog
//! GET    /api/products                - Active products
//! GET    /api/products/{id}           - Product detail
//! GET    /api/categories              - Categories
//! GET    /api/banners                 - Home page banners
//! GET    /api/search                  - Search suggestions
//!
//! # Cart (session)
//! GET    /api/cart                    - Current cart
//! DELETE /api/cart                    - Empty cart
//! POST   /api/cart/items              - Add product
//! PATCH  /api/cart/items/{productId}  - Set quantity
//! DELETE /api/cart/items/{productId}  - Remove product
//!
//! # Orders (requires auth)
//! POST   /api/orders                  - Checkout
//! GET    /api/orders                  - Order history
//! GET    /api/orders/{id}             - Order detail
//!
//! # Content & forms
//! GET    /api/content                 - All content strings
//! GET    /api/content/{key}           - One content string
//! POST   /api/contact                 - Contact form
//! POST   /api/stock-notifications     - Back-in-stock request
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod contact;
pub mod content;
pub mod orders;
pub mod products;
pub mod search;
pub mod stock_notifications;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::{get, patch, post, put},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{
    auth_rate_limiter, create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show))
        .route("/profile", put(account::update_profile))
        .route("/password", put(account::change_password))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{product_id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{id}", get(orders::show))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes().layer(auth_rate_limiter()))
        .nest("/api/account", account_routes())
        .route("/api/products", get(products::index))
        .route("/api/products/{id}", get(products::show))
        .route("/api/categories", get(products::categories))
        .route("/api/banners", get(products::banners))
        .route("/api/search", get(search::search))
        .nest("/api/cart", cart_routes())
        .nest("/api/orders", order_routes())
        .route("/api/content", get(content::index))
        .route("/api/content/{key}", get(content::show))
        .route("/api/contact", post(contact::submit))
        .route(
            "/api/stock-notifications",
            post(stock_notifications::create),
        )
}

/// Build the full application: health checks, API routes and middleware.
///
/// Sentry layers are added by the binary so tests can run without a client.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.pool(), state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
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
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match crate::db::ping(state.pool()).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{SentryConfig, StorefrontConfig};

    /// State whose pool never connects. Only routes that answer before
    /// touching the database can be exercised.
    fn test_state() -> AppState {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://loja@127.0.0.1:1/loja_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("Qm7#vR2!pZ9@wK4$tN6&yH1^cB8*dL3%"),
            sentry: SentryConfig::default(),
        };
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://loja@127.0.0.1:1/loja_test")
            .unwrap();
        AppState::new(config, pool)
    }

    fn request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.10");
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap()
    }

    async fn send(req: Request<Body>) -> Response<Body> {
        app(test_state()).oneshot(req).await.unwrap()
    }

    async fn json_body(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(request("GET", "/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let response = send(request("GET", "/health", None)).await;
        let id = response.headers().get("x-request-id").unwrap();
        assert_eq!(id.len(), 36);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let mut req = request("GET", "/health", None);
        req.headers_mut()
            .insert("x-request-id", "abc-123".parse().unwrap());
        let response = send(req).await;
        assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
    }

    #[tokio::test]
    async fn test_security_headers() {
        let response = send(request("GET", "/health", None)).await;
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_me_requires_login() {
        let response = send(request("GET", "/api/auth/me", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Não autenticado");
    }

    #[tokio::test]
    async fn test_account_requires_login() {
        let response = send(request("GET", "/api/account", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_orders_require_login() {
        let response = send(request("GET", "/api/orders", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(request("POST", "/api/orders", Some("{}"))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_short_search_returns_empty() {
        let response = send(request("GET", "/api/search?q=%20a%20", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["query"], "a");
        assert_eq!(body["results"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_search_without_query_returns_empty() {
        let response = send(request("GET", "/api/search", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["results"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_new_visitor_has_empty_cart() {
        let response = send(request("GET", "/api/cart", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["itemCount"], 0);
        assert_eq!(body["total"], "0");
        assert_eq!(body["items"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_register_missing_password_is_bad_request() {
        let response = send(request(
            "POST",
            "/api/auth/register",
            Some(r#"{"email":"ana@example.pt","name":"Ana"}"#),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "A palavra-passe é obrigatória");
    }

    #[tokio::test]
    async fn test_register_invalid_email_is_bad_request() {
        let response = send(request(
            "POST",
            "/api/auth/register",
            Some(r#"{"email":"ana","name":"Ana","password":"palavra-forte-1"}"#),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Email inválido");
    }

    #[tokio::test]
    async fn test_register_short_password_is_bad_request() {
        let response = send(request(
            "POST",
            "/api/auth/register",
            Some(r#"{"email":"ana@example.pt","name":"Ana","password":"curta"}"#),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_missing_field_is_bad_request() {
        let response = send(request(
            "POST",
            "/api/auth/login",
            Some(r#"{"email":"ana@example.pt"}"#),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_auth_rate_limit_answers_with_json() {
        let app = app(test_state());
        let login = || {
            request(
                "POST",
                "/api/auth/login",
                Some(r#"{"email":"ana@example.pt"}"#),
            )
        };

        // Burst of 5, then the sixth request from the same address is refused
        for _ in 0..5 {
            let response = app.clone().oneshot(login()).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        let response = app.clone().oneshot(login()).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key("x-request-id"));
        let body = json_body(response).await;
        assert_eq!(body["error"], "Demasiados pedidos, tente novamente mais tarde");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = send(request("POST", "/api/contact", Some("{not json"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Pedido inválido");
    }

    #[tokio::test]
    async fn test_contact_invalid_email_is_bad_request() {
        let response = send(request(
            "POST",
            "/api/contact",
            Some(r#"{"name":"Rui","email":"rui@","message":"Olá"}"#),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_zero_quantity_is_bad_request() {
        let response = send(request(
            "POST",
            "/api/cart/items",
            Some(r#"{"productId":1,"quantity":0}"#),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_line_not_in_cart_is_not_found() {
        let response = send(request(
            "PATCH",
            "/api/cart/items/7",
            Some(r#"{"quantity":2}"#),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stock_notification_invalid_email() {
        let response = send(request(
            "POST",
            "/api/stock-notifications",
            Some(r#"{"productId":1,"email":"nope"}"#),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
