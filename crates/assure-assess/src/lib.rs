//! # assure-assess — Assessment Scoring & Wizard
//!
//! The non-UI core of the compliance product: a typed answer model, a
//! pure scoring function, and the assessment wizard state machine.
//!
//! ## Architecture
//!
//! ```text
//! assure-catalog (data)  -->  assure-assess (logic)  -->  assure-api (surface)
//!   Framework/Control           AnswerSheet                 wizard sessions
//!   Question/AnswerType         score_assessment()          statistics
//!                               AssessmentWizard
//! ```
//!
//! Scoring is a pure function of `(controls, answers)` — no hidden state,
//! no I/O — so re-invoking it on an unchanged answer set yields an
//! identical [`AssessmentResult`]. All wizard failures are local and
//! recoverable; nothing here retries or aborts the process.

pub mod answer;
pub mod scoring;
pub mod wizard;

pub use answer::{Answer, AnswerError, AnswerSheet, AnswerValue};
pub use scoring::{score_assessment, AssessmentResult, ControlAssessment, ScoringError};
pub use wizard::{AssessmentWizard, TransitionRecord, WizardError, WizardStep};
