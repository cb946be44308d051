//! # Compliance Statistics API
//!
//! Dashboard summary computed on demand from the submissions store: one
//! block per catalog framework with its latest result and status
//! distribution, plus overall totals. Nothing is cached — the
//! submissions store is the single source of truth.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use assure_core::{ComplianceStatus, FrameworkId};

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::state::{AppState, SubmissionRecord};

/// Counts of submissions by resulting status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusDistribution {
    /// Submissions that scored compliant.
    pub compliant: usize,
    /// Submissions that scored partially compliant.
    pub partially_compliant: usize,
    /// Submissions that scored non-compliant.
    pub non_compliant: usize,
}

impl StatusDistribution {
    fn record(&mut self, status: ComplianceStatus) {
        match status {
            ComplianceStatus::Compliant => self.compliant += 1,
            ComplianceStatus::PartiallyCompliant => self.partially_compliant += 1,
            ComplianceStatus::NonCompliant => self.non_compliant += 1,
        }
    }
}

/// Per-framework statistics block.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FrameworkStatistics {
    /// The framework.
    #[schema(value_type = String)]
    pub framework_id: FrameworkId,
    /// Display name.
    pub name: String,
    /// Number of submitted assessments for this framework.
    pub submissions: usize,
    /// Score of the most recent submission, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_score: Option<f64>,
    /// Status of the most recent submission, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub latest_status: Option<ComplianceStatus>,
    /// Status counts across all submissions.
    pub status_distribution: StatusDistribution,
}

/// The statistics payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplianceStatistics {
    /// One block per catalog framework, in catalog order.
    pub frameworks: Vec<FrameworkStatistics>,
    /// Total submitted assessments across all frameworks.
    pub total_submissions: usize,
    /// Mean score across all submissions, absent when there are none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
}

/// Build the statistics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/compliance/statistics", get(get_statistics))
}

/// Compute the statistics from a submissions snapshot.
///
/// Split from the handler so the aggregation is unit-testable without
/// an HTTP harness.
pub fn compute_statistics(state: &AppState) -> ComplianceStatistics {
    let submissions = state.submissions.list();

    let frameworks = state
        .catalog
        .frameworks()
        .into_iter()
        .map(|summary| {
            let for_framework: Vec<&SubmissionRecord> = submissions
                .iter()
                .filter(|s| s.framework_id == summary.id)
                .collect();

            let latest = for_framework
                .iter()
                .max_by_key(|s| s.submitted_at.clone());

            let mut status_distribution = StatusDistribution::default();
            for submission in &for_framework {
                status_distribution.record(submission.result.status);
            }

            FrameworkStatistics {
                framework_id: summary.id,
                name: summary.name,
                submissions: for_framework.len(),
                latest_score: latest.map(|s| s.result.score.value()),
                latest_status: latest.map(|s| s.result.status),
                status_distribution,
            }
        })
        .collect();

    let total_submissions = submissions.len();
    let average_score = if total_submissions == 0 {
        None
    } else {
        let sum: f64 = submissions.iter().map(|s| s.result.score.value()).sum();
        Some(sum / total_submissions as f64)
    };

    ComplianceStatistics {
        frameworks,
        total_submissions,
        average_score,
    }
}

/// GET /api/v1/compliance/statistics — Dashboard summary.
#[utoipa::path(
    get,
    path = "/api/v1/compliance/statistics",
    responses(
        (status = 200, description = "Compliance statistics", body = ComplianceStatistics),
    ),
    tag = "statistics"
)]
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<Envelope<ComplianceStatistics>>, ApiError> {
    Ok(Json(Envelope::ok(compute_statistics(&state))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assure_assess::{Answer, AnswerValue, AssessmentWizard};
    use assure_catalog::CatalogProvider;
    use uuid::Uuid;

    /// Run a full wizard for `framework_id`, answering every required
    /// question with `value`, and record the submission.
    fn submit_assessment(state: &AppState, framework_id: &str, value: AnswerValue) {
        let id = FrameworkId::new(framework_id).unwrap();
        let framework = state.catalog.framework(&id).unwrap();
        let controls = framework.controls.clone();

        let mut wizard = AssessmentWizard::new();
        wizard.select_framework(framework).unwrap();
        for control in &controls {
            let required: Vec<_> = control.required_questions().cloned().collect();
            for question in required {
                wizard
                    .record_answer(question.id.clone(), Answer::of(value.clone()))
                    .unwrap();
            }
            wizard.advance().unwrap();
        }

        let session_id = Uuid::new_v4();
        wizard
            .submit_with(|result| state.record_submission(session_id, result))
            .unwrap();
    }

    #[test]
    fn empty_store_yields_zeroed_statistics() {
        let state = AppState::new();
        let stats = compute_statistics(&state);

        assert_eq!(stats.total_submissions, 0);
        assert!(stats.average_score.is_none());
        assert_eq!(stats.frameworks.len(), 3);
        for fw in &stats.frameworks {
            assert_eq!(fw.submissions, 0);
            assert!(fw.latest_score.is_none());
            assert!(fw.latest_status.is_none());
        }
    }

    #[test]
    fn submissions_grouped_by_framework() {
        let state = AppState::new();
        submit_assessment(&state, "gdpr", AnswerValue::Yes);
        submit_assessment(&state, "gdpr", AnswerValue::No);
        submit_assessment(&state, "hipaa", AnswerValue::Yes);

        let stats = compute_statistics(&state);
        assert_eq!(stats.total_submissions, 3);

        let gdpr = stats
            .frameworks
            .iter()
            .find(|f| f.framework_id.as_str() == "gdpr")
            .unwrap();
        assert_eq!(gdpr.submissions, 2);
        assert_eq!(gdpr.status_distribution.compliant, 1);
        assert_eq!(gdpr.status_distribution.non_compliant, 1);

        let iso = stats
            .frameworks
            .iter()
            .find(|f| f.framework_id.as_str() == "iso-27001")
            .unwrap();
        assert_eq!(iso.submissions, 0);
    }

    #[test]
    fn latest_submission_wins() {
        let state = AppState::new();
        // The second submission is strictly later than the first only if
        // the clock advanced between them; assert on status counts and
        // the latest value being one of the two outcomes instead.
        submit_assessment(&state, "hipaa", AnswerValue::No);
        submit_assessment(&state, "hipaa", AnswerValue::Yes);

        let stats = compute_statistics(&state);
        let hipaa = stats
            .frameworks
            .iter()
            .find(|f| f.framework_id.as_str() == "hipaa")
            .unwrap();
        assert_eq!(hipaa.submissions, 2);
        assert_eq!(hipaa.status_distribution.compliant, 1);
        assert_eq!(hipaa.status_distribution.non_compliant, 1);
        assert!(hipaa.latest_score.is_some());
        assert!(hipaa.latest_status.is_some());
    }

    #[test]
    fn average_score_spans_frameworks() {
        let state = AppState::new();
        submit_assessment(&state, "gdpr", AnswerValue::Yes); // score 1.0
        submit_assessment(&state, "hipaa", AnswerValue::No); // score 0.0

        let stats = compute_statistics(&state);
        let avg = stats.average_score.unwrap();
        assert!((avg - 0.5).abs() < 1e-9);
    }
}
