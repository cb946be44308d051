//! # assure-api — Mock Compliance Backend
//!
//! Axum HTTP services backing the compliance dashboards: a read-only
//! framework catalog, assessment wizard sessions, and a statistics
//! summary. All state is in-memory and scoped to the process lifetime.
//!
//! ## API Surface
//!
//! | Prefix                                | Module                   | Domain                |
//! |---------------------------------------|--------------------------|-----------------------|
//! | `/api/v1/compliance/frameworks/*`     | [`routes::frameworks`]   | Framework catalog     |
//! | `/api/v1/compliance/assessments/*`    | [`routes::assessments`]  | Wizard sessions       |
//! | `/api/v1/compliance/statistics`       | [`routes::statistics`]   | Dashboard statistics  |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → AuthMiddleware → RateLimitMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::{Extension, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::middleware::metrics::ApiMetrics;
use crate::middleware::rate_limit::RateLimiter;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the auth middleware
/// so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };
    let metrics = ApiMetrics::new();
    let limiter = RateLimiter::new(state.config.rate_limit.clone());

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::frameworks::router())
        .merge(routes::assessments::router())
        .merge(routes::statistics::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::rate_limit::rate_limit_middleware))
        .layer(from_fn(auth::auth_middleware))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(auth_config))
        .layer(Extension(metrics.clone()))
        .layer(Extension(limiter))
        .with_state(state);

    // Unauthenticated health probes. The readiness probe shares the
    // metrics instance so the counters are observable without
    // credentials.
    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .layer(Extension(metrics));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness payload: status plus the request counters accumulated by
/// the metrics middleware.
#[derive(Serialize)]
struct ReadinessReport {
    status: &'static str,
    requests: u64,
    errors: u64,
}

/// Readiness probe — returns 200 when the application is ready to
/// serve, with the request/error counters for quick inspection.
async fn readiness(Extension(metrics): Extension<ApiMetrics>) -> Json<ReadinessReport> {
    Json(ReadinessReport {
        status: "ready",
        requests: metrics.requests(),
        errors: metrics.errors(),
    })
}
