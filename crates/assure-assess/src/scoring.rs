//! # Compliance Score Aggregation
//!
//! Pure functions mapping an [`AnswerSheet`] and the originating control
//! list to per-control statuses and an aggregate [`AssessmentResult`].
//!
//! ## Per-Control Resolution
//!
//! 1. Any required question unanswered → the control is non-compliant,
//!    regardless of other answers.
//! 2. Otherwise the primary implementation question decides:
//!    `Yes` → compliant, `Partial` → partially compliant, anything else
//!    (`No`, `NotApplicable`, text) → non-compliant.
//!
//! ## Aggregate
//!
//! `score = (compliant + 0.5 × partially_compliant) / total`. The
//! half-credit weighting is part of the product's scoring contract and
//! must not be changed without product sign-off. The source dashboards
//! divided by zero for empty frameworks; here that is an explicit
//! [`ScoringError::EmptyFramework`] instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use assure_catalog::Control;
use assure_core::{ComplianceScore, ComplianceStatus, ControlId, FrameworkId};

use crate::answer::{AnswerSheet, AnswerValue};

/// Errors raised by the score aggregator.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScoringError {
    /// An empty control list has no defined score.
    #[error("cannot score an assessment with zero controls")]
    EmptyFramework,
}

/// The resolved status of a single control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlAssessment {
    /// The control that was resolved.
    pub control_id: ControlId,
    /// The control's title, carried for display.
    pub title: String,
    /// The resolved status.
    pub status: ComplianceStatus,
}

/// The derived result of an assessment run.
///
/// Computed at the review step, never stored authoritatively — the
/// answer sheet remains the source of truth and re-scoring an unchanged
/// sheet yields an identical result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// The assessed framework.
    pub framework_id: FrameworkId,
    /// Aggregate score in `[0, 1]`.
    pub score: ComplianceScore,
    /// Status classification of the aggregate score.
    pub status: ComplianceStatus,
    /// Controls whose required questions were all answered.
    pub completed_controls: usize,
    /// Total controls in the framework.
    pub total_controls: usize,
    /// Per-control resolution detail.
    pub control_statuses: Vec<ControlAssessment>,
}

/// Resolve the status of a single control from the answer sheet.
pub fn resolve_control(control: &Control, sheet: &AnswerSheet) -> ComplianceStatus {
    let all_required_answered = control
        .required_questions()
        .all(|q| sheet.is_answered(&q.id));
    if !all_required_answered {
        return ComplianceStatus::NonCompliant;
    }

    match sheet.get(&control.primary_question().id).map(|a| &a.value) {
        Some(AnswerValue::Yes) => ComplianceStatus::Compliant,
        Some(AnswerValue::Partial) => ComplianceStatus::PartiallyCompliant,
        _ => ComplianceStatus::NonCompliant,
    }
}

/// Score an assessment: one status per control, then the aggregate.
///
/// Pure and deterministic — no hidden state, no I/O.
///
/// # Errors
///
/// Returns [`ScoringError::EmptyFramework`] when `controls` is empty.
pub fn score_assessment(
    framework_id: FrameworkId,
    controls: &[Control],
    sheet: &AnswerSheet,
) -> Result<AssessmentResult, ScoringError> {
    if controls.is_empty() {
        return Err(ScoringError::EmptyFramework);
    }

    let control_statuses: Vec<ControlAssessment> = controls
        .iter()
        .map(|control| ControlAssessment {
            control_id: control.id.clone(),
            title: control.title.clone(),
            status: resolve_control(control, sheet),
        })
        .collect();

    let compliant = control_statuses
        .iter()
        .filter(|c| c.status == ComplianceStatus::Compliant)
        .count();
    let partial = control_statuses
        .iter()
        .filter(|c| c.status == ComplianceStatus::PartiallyCompliant)
        .count();
    let completed_controls = controls
        .iter()
        .filter(|control| {
            control
                .required_questions()
                .all(|q| sheet.is_answered(&q.id))
        })
        .count();

    // Half credit for partial implementation — exact contract weighting.
    let raw = (compliant as f64 + 0.5 * partial as f64) / controls.len() as f64;
    let score =
        ComplianceScore::new(raw).expect("compliant + partial counts never exceed total");

    tracing::debug!(
        framework = %framework_id,
        score = raw,
        compliant,
        partial,
        total = controls.len(),
        "assessment scored"
    );

    Ok(AssessmentResult {
        framework_id,
        status: score.status(),
        score,
        completed_controls,
        total_controls: controls.len(),
        control_statuses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assure_catalog::{AnswerType, Question};
    use assure_core::QuestionId;
    use crate::answer::Answer;

    /// Build `n` single-question controls (primary, required,
    /// yes-no-partial) for threshold scenarios.
    fn controls(n: usize) -> Vec<Control> {
        (0..n)
            .map(|i| {
                let cid = ControlId::new(format!("c{i}")).unwrap();
                Control::new(
                    cid.clone(),
                    format!("Control {i}"),
                    "Test",
                    vec![Question {
                        id: QuestionId::new(format!("c{i}-q1")).unwrap(),
                        control_id: cid,
                        prompt: "Implemented?".to_string(),
                        answer_type: AnswerType::YesNoPartial,
                        required: true,
                        primary: true,
                    }],
                )
                .unwrap()
            })
            .collect()
    }

    fn answer_all(controls: &[Control], values: &[AnswerValue]) -> AnswerSheet {
        let mut sheet = AnswerSheet::blank(controls);
        for (control, value) in controls.iter().zip(values) {
            sheet
                .record(control.primary_question().id.clone(), Answer::of(value.clone()))
                .unwrap();
        }
        sheet
    }

    fn fid() -> FrameworkId {
        FrameworkId::new("test").unwrap()
    }

    #[test]
    fn eight_yes_two_partial_is_compliant() {
        let controls = controls(10);
        let mut values = vec![AnswerValue::Yes; 8];
        values.extend(vec![AnswerValue::Partial; 2]);
        let sheet = answer_all(&controls, &values);

        let result = score_assessment(fid(), &controls, &sheet).unwrap();
        assert!((result.score.value() - 0.9).abs() < 1e-9);
        assert_eq!(result.status, ComplianceStatus::Compliant);
        assert_eq!(result.completed_controls, 10);
    }

    #[test]
    fn four_yes_four_partial_two_no_is_partially_compliant() {
        let controls = controls(10);
        let mut values = vec![AnswerValue::Yes; 4];
        values.extend(vec![AnswerValue::Partial; 4]);
        values.extend(vec![AnswerValue::No; 2]);
        let sheet = answer_all(&controls, &values);

        let result = score_assessment(fid(), &controls, &sheet).unwrap();
        assert!((result.score.value() - 0.6).abs() < 1e-9);
        assert_eq!(result.status, ComplianceStatus::PartiallyCompliant);
    }

    #[test]
    fn two_yes_eight_no_is_non_compliant() {
        let controls = controls(10);
        let mut values = vec![AnswerValue::Yes; 2];
        values.extend(vec![AnswerValue::No; 8]);
        let sheet = answer_all(&controls, &values);

        let result = score_assessment(fid(), &controls, &sheet).unwrap();
        assert!((result.score.value() - 0.2).abs() < 1e-9);
        assert_eq!(result.status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn unanswered_required_question_forces_non_compliant() {
        // Control with a required secondary question left unanswered:
        // even a Yes on the primary question cannot rescue it.
        let cid = ControlId::new("c0").unwrap();
        let control = Control::new(
            cid.clone(),
            "Control 0",
            "Test",
            vec![
                Question {
                    id: QuestionId::new("c0-q1").unwrap(),
                    control_id: cid.clone(),
                    prompt: "Implemented?".to_string(),
                    answer_type: AnswerType::YesNoPartial,
                    required: true,
                    primary: true,
                },
                Question {
                    id: QuestionId::new("c0-q2").unwrap(),
                    control_id: cid,
                    prompt: "Documented?".to_string(),
                    answer_type: AnswerType::YesNo,
                    required: true,
                    primary: false,
                },
            ],
        )
        .unwrap();

        let mut sheet = AnswerSheet::blank(std::slice::from_ref(&control));
        sheet
            .record(
                QuestionId::new("c0-q1").unwrap(),
                Answer::of(AnswerValue::Yes),
            )
            .unwrap();

        assert_eq!(
            resolve_control(&control, &sheet),
            ComplianceStatus::NonCompliant
        );

        let result =
            score_assessment(fid(), std::slice::from_ref(&control), &sheet).unwrap();
        assert_eq!(result.completed_controls, 0);
        assert_eq!(result.score.value(), 0.0);
    }

    #[test]
    fn not_applicable_primary_answer_resolves_non_compliant() {
        // "Anything else → non-compliant" is exact: N/A gets no credit.
        let cid = ControlId::new("c0").unwrap();
        let control = Control::new(
            cid.clone(),
            "Control 0",
            "Test",
            vec![Question {
                id: QuestionId::new("c0-q1").unwrap(),
                control_id: cid,
                prompt: "Implemented?".to_string(),
                answer_type: AnswerType::YesNoNa,
                required: true,
                primary: true,
            }],
        )
        .unwrap();

        let mut sheet = AnswerSheet::blank(std::slice::from_ref(&control));
        sheet
            .record(
                QuestionId::new("c0-q1").unwrap(),
                Answer::of(AnswerValue::NotApplicable),
            )
            .unwrap();

        assert_eq!(
            resolve_control(&control, &sheet),
            ComplianceStatus::NonCompliant
        );
    }

    #[test]
    fn empty_framework_is_rejected_not_nan() {
        let sheet = AnswerSheet::default();
        let err = score_assessment(fid(), &[], &sheet).unwrap_err();
        assert_eq!(err, ScoringError::EmptyFramework);
    }

    #[test]
    fn scoring_is_idempotent() {
        let controls = controls(5);
        let values = vec![
            AnswerValue::Yes,
            AnswerValue::Partial,
            AnswerValue::No,
            AnswerValue::Yes,
            AnswerValue::Partial,
        ];
        let sheet = answer_all(&controls, &values);

        let first = score_assessment(fid(), &controls, &sheet).unwrap();
        let second = score_assessment(fid(), &controls, &sheet).unwrap();
        assert_eq!(first, second);
    }
}
