//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                  - Redirect to the request page
//! - `/api-admin`              - Access request form (cookie session required)
//! - `/api-admin/status`       - Access request status (cookie session required)
//! - `GET  /api-tos`           - Terms of service
//! - `/login`, `/logout`       - Token sign-in
//! - `GET  /health`            - Health check
//! - `/static/*`               - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Cookie session on portal pages
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

fn protected_routes(state: AppState) -> Router<AppState> {
    web::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state, web_auth::layer))
}

/// Portal routes with authentication, without rate limiting.
///
/// Rate limiters read the peer address from `ConnectInfo`, which in-process
/// test clients do not provide.
pub fn portal_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(protected_routes(state))
        .merge(web::routes::public_routes())
        .merge(web::routes::sign_in_routes())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let portal = Router::new()
        .merge(protected_routes(state.clone()).layer(rate_limit::layer()))
        .merge(web::routes::public_routes().layer(rate_limit::layer()))
        .merge(web::routes::sign_in_routes().layer(rate_limit::login_layer()));

    let router = Router::new()
        .merge(portal)
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
