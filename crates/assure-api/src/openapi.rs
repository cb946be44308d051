//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Assure Stack API",
        version = "0.2.0",
        description = "Mock compliance backend: framework catalog, assessment wizard sessions, and compliance statistics for GDPR, HIPAA, and ISO 27001.",
        license(name = "Apache-2.0")
    ),
    paths(
        // Frameworks
        crate::routes::frameworks::list_frameworks,
        crate::routes::frameworks::get_framework,
        crate::routes::frameworks::list_controls,
        // Assessments
        crate::routes::assessments::start_assessment,
        crate::routes::assessments::list_assessments,
        crate::routes::assessments::get_assessment,
        crate::routes::assessments::select_framework,
        crate::routes::assessments::record_answer,
        crate::routes::assessments::advance_assessment,
        crate::routes::assessments::back_assessment,
        crate::routes::assessments::submit_assessment,
        // Statistics
        crate::routes::statistics::get_statistics,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Envelope metadata
        crate::envelope::PaginationMeta,
        // State record types
        crate::state::SubmissionRecord,
        // Assessment DTOs
        crate::routes::assessments::StartAssessmentRequest,
        crate::routes::assessments::RecordAnswerRequest,
        crate::routes::assessments::AssessmentView,
        crate::routes::assessments::CurrentControlView,
        // Statistics DTOs
        crate::routes::statistics::ComplianceStatistics,
        crate::routes::statistics::FrameworkStatistics,
        crate::routes::statistics::StatusDistribution,
    )),
    tags(
        (name = "frameworks", description = "Framework catalog — read-only compliance standards"),
        (name = "assessments", description = "Assessment wizard sessions"),
        (name = "statistics", description = "Compliance statistics computed from submissions"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
