//! # Framework Catalog API
//!
//! Read-only endpoints over the [`CatalogProvider`] seam.
//!
//! ## Endpoints
//!
//! - `GET /api/v1/compliance/frameworks` — list framework summaries
//! - `GET /api/v1/compliance/frameworks/:id` — full framework
//! - `GET /api/v1/compliance/frameworks/:id/controls` — controls
//!
//! Listing endpoints are paginated; `:id` lookups resolve through
//! [`FrameworkId`] validation first, so a blank path segment is a 422
//! rather than a 404.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use assure_catalog::{Control, Framework, FrameworkSummary};
use assure_core::FrameworkId;

use crate::envelope::{paginate, Envelope, PageParams};
use crate::error::ApiError;
use crate::state::AppState;

/// Build the frameworks router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/compliance/frameworks", get(list_frameworks))
        .route("/api/v1/compliance/frameworks/:id", get(get_framework))
        .route(
            "/api/v1/compliance/frameworks/:id/controls",
            get(list_controls),
        )
}

fn parse_framework_id(raw: &str) -> Result<FrameworkId, ApiError> {
    FrameworkId::new(raw).map_err(|err| ApiError::Validation(err.to_string()))
}

fn lookup_framework(state: &AppState, id: &FrameworkId) -> Result<Framework, ApiError> {
    state
        .catalog
        .framework(id)
        .ok_or_else(|| ApiError::NotFound(format!("framework \"{id}\"")))
}

/// GET /api/v1/compliance/frameworks — List framework summaries.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/frameworks",
    params(PageParams),
    responses(
        (status = 200, description = "Paginated framework summaries"),
        (status = 422, description = "Pagination out of range", body = crate::error::ErrorBody),
    ),
    tag = "frameworks"
)]
pub async fn list_frameworks(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Envelope<Vec<FrameworkSummary>>>, ApiError> {
    let (page, page_size) = params.validate()?;
    let summaries = state.catalog.frameworks();
    let (slice, meta) = paginate(&summaries, page, page_size);
    Ok(Json(Envelope::paginated(slice, meta)))
}

/// GET /api/v1/compliance/frameworks/:id — Full framework with controls.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/frameworks/{id}",
    params(("id" = String, Path, description = "Framework identifier")),
    responses(
        (status = 200, description = "The framework"),
        (status = 404, description = "Unknown framework", body = crate::error::ErrorBody),
    ),
    tag = "frameworks"
)]
pub async fn get_framework(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Framework>>, ApiError> {
    let id = parse_framework_id(&id)?;
    let framework = lookup_framework(&state, &id)?;
    Ok(Json(Envelope::ok(framework)))
}

/// GET /api/v1/compliance/frameworks/:id/controls — Paginated controls.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/frameworks/{id}/controls",
    params(
        ("id" = String, Path, description = "Framework identifier"),
        PageParams,
    ),
    responses(
        (status = 200, description = "Paginated controls"),
        (status = 404, description = "Unknown framework", body = crate::error::ErrorBody),
    ),
    tag = "frameworks"
)]
pub async fn list_controls(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Envelope<Vec<Control>>>, ApiError> {
    let (page, page_size) = params.validate()?;
    let id = parse_framework_id(&id)?;
    let framework = lookup_framework(&state, &id)?;
    let (slice, meta) = paginate(&framework.controls, page, page_size);
    Ok(Json(Envelope::paginated(slice, meta)))
}
