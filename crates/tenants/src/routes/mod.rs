//! HTTP route handlers for the tenants service.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                - Liveness check
//! GET   /health/ready          - Readiness check (store reachable)
//!
//! # Tenants
//! GET   /api/tenants/{slug}    - Fetch client view (?secret=...)
//! POST  /api/tenants/{slug}    - Create tenant (JSON: email, password, secret)
//! PATCH /api/tenants/{slug}    - Owner update (JSON: tenant; Authorization: Bearer)
//! *     /api/tenants/{slug}    - 304
//! ```

pub mod health;
pub mod tenants;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the tenant routes router.
pub fn tenant_routes() -> Router<AppState> {
    Router::new().route(
        "/{slug}",
        get(tenants::fetch)
            .post(tenants::create)
            .patch(tenants::update)
            .fallback(tenants::unsupported),
    )
}

/// Create all routes for the tenants service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/tenants", tenant_routes())
}

/// Build the complete application with tracing and request ids.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}
