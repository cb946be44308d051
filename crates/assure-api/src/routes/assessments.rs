//! # Assessment Session API
//!
//! Wizard sessions over the in-memory session store. Starting an
//! assessment creates a wizard, selects the framework, and returns the
//! session snapshot; subsequent calls mutate the session through
//! [`Store::try_update`] so validate-and-step is atomic per session.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/compliance/assessments` — start a session
//! - `GET /api/v1/compliance/assessments` — list sessions
//! - `GET /api/v1/compliance/assessments/:id` — session snapshot
//! - `PUT /api/v1/compliance/assessments/:id/framework` — reselect a
//!   framework after backing out to `SELECT_FRAMEWORK`
//! - `PUT /api/v1/compliance/assessments/:id/answers` — record an answer
//! - `POST /api/v1/compliance/assessments/:id/advance` — step forward
//! - `POST /api/v1/compliance/assessments/:id/back` — step backward
//! - `POST /api/v1/compliance/assessments/:id/submit` — finalize
//!
//! [`Store::try_update`]: crate::state::Store::try_update

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use assure_assess::{
    Answer, AnswerValue, AssessmentResult, AssessmentWizard, TransitionRecord, WizardStep,
};
use assure_core::{ControlId, FrameworkId, QuestionId, Timestamp};

use crate::envelope::{paginate, Envelope, PageParams};
use crate::error::ApiError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to start an assessment session.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartAssessmentRequest {
    /// The framework to assess (e.g., "gdpr").
    pub framework_id: String,
}

impl Validate for StartAssessmentRequest {
    fn validate(&self) -> Result<(), String> {
        if self.framework_id.trim().is_empty() {
            return Err("framework_id must not be empty".to_string());
        }
        Ok(())
    }
}

/// Request to record an answer to a question of the selected framework.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordAnswerRequest {
    /// The question being answered.
    pub question_id: String,
    /// The answer value, e.g. `{"kind": "yes"}` or
    /// `{"kind": "text", "value": "..."}`.
    #[schema(value_type = Object)]
    pub value: AnswerValue,
    /// Optional assessor notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for RecordAnswerRequest {
    fn validate(&self) -> Result<(), String> {
        if self.question_id.trim().is_empty() {
            return Err("question_id must not be empty".to_string());
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > 4096 {
                return Err("notes must not exceed 4096 characters".to_string());
            }
        }
        Ok(())
    }
}

/// The control currently being answered, carried in the session
/// snapshot so clients can render the questionnaire without a second
/// catalog round trip.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentControlView {
    /// Zero-based position in the framework's control list.
    pub index: usize,
    /// The control identifier.
    #[schema(value_type = String)]
    pub control_id: ControlId,
    /// The control's title.
    pub title: String,
    /// Grouping category.
    pub category: String,
}

/// Snapshot of a wizard session, the payload of every assessment
/// endpoint except submit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssessmentView {
    /// Session identifier.
    pub id: Uuid,
    /// The wizard's current step, e.g.
    /// `{"step": "ANSWER_CONTROL", "index": 2}`.
    #[schema(value_type = Object)]
    pub step: WizardStep,
    /// The selected framework, once one is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub framework_id: Option<FrameworkId>,
    /// Total controls in the selected framework.
    pub total_controls: usize,
    /// The control being answered, when in an answering step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_control: Option<CurrentControlView>,
    /// Questions answered so far.
    pub answered_questions: usize,
    /// Total questions in the selected framework.
    pub total_questions: usize,
    /// The computed result, present from the review step onward.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub result: Option<AssessmentResult>,
    /// Applied transitions, oldest first.
    #[schema(value_type = Vec<Object>)]
    pub transition_log: Vec<TransitionRecord>,
    /// When the session was created.
    #[schema(value_type = String)]
    pub created_at: Timestamp,
    /// When the session last changed.
    #[schema(value_type = String)]
    pub updated_at: Timestamp,
}

impl AssessmentView {
    /// Build the snapshot from a wizard session.
    pub fn of(wizard: &AssessmentWizard) -> Self {
        let current_control = match wizard.step() {
            WizardStep::AnswerControl { index } => {
                wizard.current_control().map(|control| CurrentControlView {
                    index,
                    control_id: control.id.clone(),
                    title: control.title.clone(),
                    category: control.category.clone(),
                })
            }
            _ => None,
        };

        Self {
            id: *wizard.id().as_uuid(),
            step: wizard.step(),
            framework_id: wizard.framework().map(|f| f.id.clone()),
            total_controls: wizard.framework().map(|f| f.controls.len()).unwrap_or(0),
            current_control,
            answered_questions: wizard.sheet().answered_count(),
            total_questions: wizard.sheet().question_count(),
            result: wizard.result().cloned(),
            transition_log: wizard.transition_log().to_vec(),
            created_at: wizard.created_at().clone(),
            updated_at: wizard.updated_at().clone(),
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the assessments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/compliance/assessments",
            get(list_assessments).post(start_assessment),
        )
        .route("/api/v1/compliance/assessments/:id", get(get_assessment))
        .route(
            "/api/v1/compliance/assessments/:id/framework",
            put(select_framework),
        )
        .route(
            "/api/v1/compliance/assessments/:id/answers",
            put(record_answer),
        )
        .route(
            "/api/v1/compliance/assessments/:id/advance",
            post(advance_assessment),
        )
        .route(
            "/api/v1/compliance/assessments/:id/back",
            post(back_assessment),
        )
        .route(
            "/api/v1/compliance/assessments/:id/submit",
            post(submit_assessment),
        )
}

/// Apply `f` to the session with ID `id`, mapping a missing session to
/// 404 and flattening the wizard's error into [`ApiError`].
fn with_session<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut AssessmentWizard) -> Result<R, ApiError>,
) -> Result<R, ApiError> {
    state
        .sessions
        .try_update(&id, f)
        .ok_or_else(|| ApiError::NotFound(format!("assessment \"{id}\"")))?
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /api/v1/compliance/assessments — Start a session.
#[utoipa::path(
    post,
    path = "/api/v1/compliance/assessments",
    request_body = StartAssessmentRequest,
    responses(
        (status = 201, description = "Session created", body = AssessmentView),
        (status = 404, description = "Unknown framework", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn start_assessment(
    State(state): State<AppState>,
    body: Result<Json<StartAssessmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<AssessmentView>>), ApiError> {
    let req = extract_validated_json(body)?;
    let framework_id = FrameworkId::new(&req.framework_id)?;
    let framework = state
        .catalog
        .framework(&framework_id)
        .ok_or_else(|| ApiError::NotFound(format!("framework \"{framework_id}\"")))?;

    let mut wizard = AssessmentWizard::new();
    wizard.select_framework(framework)?;

    let view = AssessmentView::of(&wizard);
    let id = *wizard.id().as_uuid();
    state.sessions.insert(id, wizard);

    tracing::info!(assessment = %id, framework = %framework_id, "assessment started");
    Ok((StatusCode::CREATED, Json(Envelope::ok(view))))
}

/// GET /api/v1/compliance/assessments — List sessions.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/assessments",
    params(PageParams),
    responses(
        (status = 200, description = "Paginated session snapshots"),
        (status = 422, description = "Pagination out of range", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn list_assessments(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Envelope<Vec<AssessmentView>>>, ApiError> {
    let (page, page_size) = params.validate()?;

    // Stable listing order regardless of HashMap iteration order.
    let mut sessions = state.sessions.list();
    sessions.sort_by(|a, b| {
        a.created_at()
            .cmp(b.created_at())
            .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
    });

    let views: Vec<AssessmentView> = sessions.iter().map(AssessmentView::of).collect();
    let (slice, meta) = paginate(&views, page, page_size);
    Ok(Json(Envelope::paginated(slice, meta)))
}

/// GET /api/v1/compliance/assessments/:id — Session snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/assessments/{id}",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session snapshot", body = AssessmentView),
        (status = 404, description = "Unknown session", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<AssessmentView>>, ApiError> {
    let wizard = state
        .sessions
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("assessment \"{id}\"")))?;
    Ok(Json(Envelope::ok(AssessmentView::of(&wizard))))
}

/// PUT /api/v1/compliance/assessments/:id/framework — Reselect a
/// framework.
///
/// Valid only in the `SELECT_FRAMEWORK` step (i.e., after backing all
/// the way out). Materializes a fresh blank answer sheet, as the
/// dashboards did on reselection.
#[utoipa::path(
    put,
    path = "/api/v1/compliance/assessments/{id}/framework",
    params(("id" = Uuid, Path, description = "Session identifier")),
    request_body = StartAssessmentRequest,
    responses(
        (status = 200, description = "Framework selected", body = AssessmentView),
        (status = 404, description = "Unknown session or framework", body = crate::error::ErrorBody),
        (status = 409, description = "A framework is already selected", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn select_framework(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<StartAssessmentRequest>, JsonRejection>,
) -> Result<Json<Envelope<AssessmentView>>, ApiError> {
    let req = extract_validated_json(body)?;
    let framework_id = FrameworkId::new(&req.framework_id)?;
    let framework = state
        .catalog
        .framework(&framework_id)
        .ok_or_else(|| ApiError::NotFound(format!("framework \"{framework_id}\"")))?;

    let view = with_session(&state, id, |wizard| {
        wizard.select_framework(framework)?;
        Ok(AssessmentView::of(wizard))
    })?;
    Ok(Json(Envelope::ok(view)))
}

/// PUT /api/v1/compliance/assessments/:id/answers — Record an answer.
#[utoipa::path(
    put,
    path = "/api/v1/compliance/assessments/{id}/answers",
    params(("id" = Uuid, Path, description = "Session identifier")),
    request_body = RecordAnswerRequest,
    responses(
        (status = 200, description = "Answer recorded", body = AssessmentView),
        (status = 404, description = "Unknown session", body = crate::error::ErrorBody),
        (status = 409, description = "Not in an answering step", body = crate::error::ErrorBody),
        (status = 422, description = "Unknown question or inadmissible value", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn record_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<RecordAnswerRequest>, JsonRejection>,
) -> Result<Json<Envelope<AssessmentView>>, ApiError> {
    let req = extract_validated_json(body)?;
    let question_id = QuestionId::new(&req.question_id)?;
    let answer = Answer {
        value: req.value,
        notes: req.notes,
    };

    let view = with_session(&state, id, |wizard| {
        wizard.record_answer(question_id, answer)?;
        Ok(AssessmentView::of(wizard))
    })?;
    Ok(Json(Envelope::ok(view)))
}

/// POST /api/v1/compliance/assessments/:id/advance — Step forward.
///
/// Validates the current control; entering review computes the result.
#[utoipa::path(
    post,
    path = "/api/v1/compliance/assessments/{id}/advance",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Stepped forward", body = AssessmentView),
        (status = 404, description = "Unknown session", body = crate::error::ErrorBody),
        (status = 409, description = "No forward transition from this step", body = crate::error::ErrorBody),
        (status = 422, description = "Unanswered required questions", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn advance_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<AssessmentView>>, ApiError> {
    let view = with_session(&state, id, |wizard| {
        wizard.advance()?;
        Ok(AssessmentView::of(wizard))
    })?;
    Ok(Json(Envelope::ok(view)))
}

/// POST /api/v1/compliance/assessments/:id/back — Step backward.
///
/// Never re-validates and never discards answers.
#[utoipa::path(
    post,
    path = "/api/v1/compliance/assessments/{id}/back",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Stepped backward", body = AssessmentView),
        (status = 404, description = "Unknown session", body = crate::error::ErrorBody),
        (status = 409, description = "No backward transition from this step", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn back_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<AssessmentView>>, ApiError> {
    let view = with_session(&state, id, |wizard| {
        wizard.back()?;
        Ok(AssessmentView::of(wizard))
    })?;
    Ok(Json(Envelope::ok(view)))
}

/// POST /api/v1/compliance/assessments/:id/submit — Finalize.
///
/// Records the result in the submissions store (feeding the statistics
/// endpoint) and returns it. The session becomes terminal.
#[utoipa::path(
    post,
    path = "/api/v1/compliance/assessments/{id}/submit",
    params(("id" = Uuid, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Assessment result"),
        (status = 404, description = "Unknown session", body = crate::error::ErrorBody),
        (status = 409, description = "Not at the review step", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn submit_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<AssessmentResult>>, ApiError> {
    let recorder = state.clone();
    let result = with_session(&state, id, |wizard| {
        let result = wizard.submit_with(|result| recorder.record_submission(id, result))?;
        Ok(result)
    })?;
    Ok(Json(Envelope::ok(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_limit_counts_characters_not_bytes() {
        // 4096 two-byte characters: 8192 bytes, still within the limit.
        let req = RecordAnswerRequest {
            question_id: "gdpr-art6-q1".to_string(),
            value: AnswerValue::Yes,
            notes: Some("é".repeat(4096)),
        };
        assert!(req.validate().is_ok());

        let req = RecordAnswerRequest {
            question_id: "gdpr-art6-q1".to_string(),
            value: AnswerValue::Yes,
            notes: Some("x".repeat(4097)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn start_request_rejects_blank_framework() {
        let req = StartAssessmentRequest {
            framework_id: "   ".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
