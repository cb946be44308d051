//! # Assessment Wizard State Machine
//!
//! Walks an assessor through framework selection, a per-control
//! questionnaire, and review/submit:
//!
//! ```text
//! SELECT_FRAMEWORK ─select_framework()──▶ ANSWER_CONTROL[0]
//!     ▲                                        │ advance() (validates control 0)
//!     │ back()                                 ▼
//!     └──────────────────────────────  ANSWER_CONTROL[i] ◀──┐
//!                                              │ advance()  │ back()
//!                                              ▼            │
//!                                  ANSWER_CONTROL[N-1] ─────┘
//!                                              │ advance() (validates, scores once)
//!                                              ▼
//!                                           REVIEW ─submit()──▶ SUBMITTED
//! ```
//!
//! Forward transitions validate that every required question of the
//! current control is answered; a failed validation leaves the state
//! unchanged and produces a recoverable error naming the control.
//! Backward transitions never re-validate and never discard answers.
//! Every applied transition is recorded in an audit log.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use assure_catalog::{Control, Framework};
use assure_core::{AssessmentId, ControlId, QuestionId, Timestamp};

use crate::answer::{Answer, AnswerError, AnswerSheet};
use crate::scoring::{score_assessment, AssessmentResult, ScoringError};

/// The wizard's current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    /// Awaiting framework selection.
    SelectFramework,
    /// Answering the questionnaire for control `index`.
    AnswerControl {
        /// Zero-based index into the framework's control list.
        index: usize,
    },
    /// All controls validated; result computed and awaiting submission.
    Review,
    /// Result handed to the completion handler. Terminal.
    Submitted,
}

impl WizardStep {
    /// The canonical step name as it appears in the audit log.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectFramework => "SELECT_FRAMEWORK",
            Self::AnswerControl { .. } => "ANSWER_CONTROL",
            Self::Review => "REVIEW",
            Self::Submitted => "SUBMITTED",
        }
    }

    /// Whether this is a terminal step (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnswerControl { index } => write!(f, "ANSWER_CONTROL[{index}]"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// A record of a single applied wizard transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Step before the transition.
    pub from_step: WizardStep,
    /// Step after the transition.
    pub to_step: WizardStep,
    /// When the transition occurred.
    pub timestamp: Timestamp,
}

/// Errors raised by wizard operations.
///
/// All of these are local and recoverable — the wizard state is
/// unchanged after an error and the caller may correct and retry.
#[derive(Error, Debug)]
pub enum WizardError {
    /// The requested transition is not valid from the current step.
    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current step.
        from: String,
        /// The attempted target step.
        to: String,
        /// Human-readable reason for the rejection.
        reason: String,
    },

    /// A forward transition was rejected because the current control
    /// has unanswered required questions.
    #[error(
        "control \"{control_title}\" has {} unanswered required question(s): {}",
        missing.len(),
        missing.iter().map(QuestionId::as_str).collect::<Vec<_>>().join(", ")
    )]
    IncompleteControl {
        /// The control that failed validation.
        control_id: ControlId,
        /// The control's title, for the inline validation message.
        control_title: String,
        /// The unanswered required questions.
        missing: Vec<QuestionId>,
    },

    /// A framework with zero controls cannot be assessed.
    #[error("selected framework \"{framework_id}\" has no controls")]
    EmptyFramework {
        /// The rejected framework.
        framework_id: assure_core::FrameworkId,
    },

    /// Answer recording failed.
    #[error(transparent)]
    Answer(#[from] AnswerError),

    /// Score computation failed.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// The assessment wizard: a linear state machine over in-memory data.
///
/// Selecting a framework snapshots its control list and materializes a
/// blank [`AnswerSheet`]. Navigating back to `SELECT_FRAMEWORK` keeps
/// the recorded answers; selecting a framework again (same or different)
/// re-materializes a blank sheet, as the dashboards did.
#[derive(Debug, Clone)]
pub struct AssessmentWizard {
    id: AssessmentId,
    step: WizardStep,
    framework: Option<Framework>,
    sheet: AnswerSheet,
    result: Option<AssessmentResult>,
    transition_log: Vec<TransitionRecord>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AssessmentWizard {
    /// Create a wizard in the `SELECT_FRAMEWORK` step.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: AssessmentId::new(),
            step: WizardStep::SelectFramework,
            framework: None,
            sheet: AnswerSheet::default(),
            result: None,
            transition_log: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// The session identifier.
    pub fn id(&self) -> AssessmentId {
        self.id
    }

    /// The current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The selected framework, if any.
    pub fn framework(&self) -> Option<&Framework> {
        self.framework.as_ref()
    }

    /// The control currently being answered, if in an answering step.
    pub fn current_control(&self) -> Option<&Control> {
        match self.step {
            WizardStep::AnswerControl { index } => {
                self.framework.as_ref().and_then(|f| f.controls.get(index))
            }
            _ => None,
        }
    }

    /// The answer sheet.
    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    /// The computed result, present from the review step onward.
    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    /// The transition audit log.
    pub fn transition_log(&self) -> &[TransitionRecord] {
        &self.transition_log
    }

    /// When the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// When the session last transitioned or recorded an answer.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Select a framework and materialize a blank answer sheet.
    ///
    /// # Errors
    ///
    /// Rejected outside `SELECT_FRAMEWORK`, and for frameworks with no
    /// controls.
    pub fn select_framework(&mut self, framework: Framework) -> Result<(), WizardError> {
        if self.step != WizardStep::SelectFramework {
            return Err(self.invalid("ANSWER_CONTROL", "a framework is already selected"));
        }
        if framework.controls.is_empty() {
            return Err(WizardError::EmptyFramework {
                framework_id: framework.id.clone(),
            });
        }

        tracing::debug!(
            assessment = %self.id,
            framework = %framework.id,
            controls = framework.controls.len(),
            "framework selected"
        );

        self.sheet = AnswerSheet::blank(&framework.controls);
        self.result = None;
        self.framework = Some(framework);
        self.transition(WizardStep::AnswerControl { index: 0 });
        Ok(())
    }

    /// Record an answer to any question of the selected framework.
    ///
    /// Permitted only while answering (including after navigating back
    /// to an earlier control); rejected in `SELECT_FRAMEWORK`, `REVIEW`,
    /// and `SUBMITTED`.
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<(), WizardError> {
        if !matches!(self.step, WizardStep::AnswerControl { .. }) {
            return Err(self.invalid(
                self.step.name(),
                "answers can only be recorded while answering controls",
            ));
        }
        self.sheet.record(question_id, answer)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Advance to the next control, or to review from the last control.
    ///
    /// Validates that every required question of the current control is
    /// answered. Entering review computes the [`AssessmentResult`];
    /// re-entering review after backward edits recomputes it from the
    /// current answers.
    ///
    /// # Errors
    ///
    /// [`WizardError::IncompleteControl`] on failed validation (state
    /// unchanged); [`WizardError::InvalidTransition`] outside answering
    /// steps.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let index = match self.step {
            WizardStep::AnswerControl { index } => index,
            WizardStep::SelectFramework => {
                return Err(self.invalid("ANSWER_CONTROL", "no framework selected"))
            }
            WizardStep::Review => {
                return Err(self.invalid("SUBMITTED", "use submit to leave the review step"))
            }
            WizardStep::Submitted => {
                return Err(self.invalid("ANSWER_CONTROL", "assessment already submitted"))
            }
        };

        self.validate_control(index)?;

        let framework = self
            .framework
            .as_ref()
            .expect("answering steps always have a framework");

        if index + 1 < framework.controls.len() {
            self.transition(WizardStep::AnswerControl { index: index + 1 });
        } else {
            let result = score_assessment(
                framework.id.clone(),
                &framework.controls,
                &self.sheet,
            )?;
            tracing::info!(
                assessment = %self.id,
                framework = %result.framework_id,
                score = result.score.value(),
                status = %result.status,
                "assessment scored for review"
            );
            self.result = Some(result);
            self.transition(WizardStep::Review);
        }
        Ok(self.step)
    }

    /// Step backward without re-validating or discarding answers.
    ///
    /// # Errors
    ///
    /// Rejected in `SELECT_FRAMEWORK` (nothing before it) and in
    /// `SUBMITTED` (terminal).
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let target = match self.step {
            WizardStep::AnswerControl { index: 0 } => WizardStep::SelectFramework,
            WizardStep::AnswerControl { index } => WizardStep::AnswerControl { index: index - 1 },
            WizardStep::Review => {
                let controls = self
                    .framework
                    .as_ref()
                    .map(|f| f.controls.len())
                    .unwrap_or(1);
                WizardStep::AnswerControl { index: controls - 1 }
            }
            WizardStep::SelectFramework => {
                return Err(self.invalid("SELECT_FRAMEWORK", "already at the first step"))
            }
            WizardStep::Submitted => {
                return Err(self.invalid("REVIEW", "assessment already submitted"))
            }
        };
        self.transition(target);
        Ok(self.step)
    }

    /// Submit the assessment, invoking the caller-supplied completion
    /// handler with the computed result. Terminal.
    ///
    /// # Errors
    ///
    /// Rejected outside `REVIEW`.
    pub fn submit_with(
        &mut self,
        on_complete: impl FnOnce(&AssessmentResult),
    ) -> Result<AssessmentResult, WizardError> {
        if self.step != WizardStep::Review {
            return Err(self.invalid("SUBMITTED", "submit is only valid from the review step"));
        }
        let result = self
            .result
            .clone()
            .expect("review step always has a computed result");
        on_complete(&result);
        self.transition(WizardStep::Submitted);
        tracing::info!(assessment = %self.id, "assessment submitted");
        Ok(result)
    }

    /// Submit without a completion handler.
    pub fn submit(&mut self) -> Result<AssessmentResult, WizardError> {
        self.submit_with(|_| {})
    }

    /// Collect unanswered required questions of control `index`.
    fn validate_control(&self, index: usize) -> Result<(), WizardError> {
        let control = self
            .framework
            .as_ref()
            .and_then(|f| f.controls.get(index))
            .expect("answering steps index into the selected framework");

        let missing: Vec<QuestionId> = control
            .required_questions()
            .filter(|q| !self.sheet.is_answered(&q.id))
            .map(|q| q.id.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(WizardError::IncompleteControl {
                control_id: control.id.clone(),
                control_title: control.title.clone(),
                missing,
            })
        }
    }

    fn transition(&mut self, to: WizardStep) {
        self.transition_log.push(TransitionRecord {
            from_step: self.step,
            to_step: to,
            timestamp: Timestamp::now(),
        });
        self.step = to;
        self.updated_at = Timestamp::now();
    }

    fn invalid(&self, to: &str, reason: &str) -> WizardError {
        WizardError::InvalidTransition {
            from: self.step.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Default for AssessmentWizard {
    fn default() -> Self {
        Self::new()
    }
}
