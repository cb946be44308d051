//! # Typed Answer Model
//!
//! [`AnswerValue`] is a sum type replacing the source dashboards'
//! duck-typed `string | string[] | boolean | null` answer values. Each
//! [`AnswerType`] admits a fixed subset of values, enforced when an
//! answer is recorded, so invalid-value classes are unrepresentable
//! downstream of the [`AnswerSheet`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use assure_catalog::{AnswerType, Control};
use assure_core::QuestionId;

/// Errors raised while recording answers.
#[derive(Error, Debug)]
pub enum AnswerError {
    /// The question does not belong to the selected framework.
    #[error("unknown question \"{0}\"")]
    UnknownQuestion(QuestionId),

    /// The value is not admissible for the question's answer type.
    #[error("value {value:?} is not admissible for question \"{question_id}\" ({answer_type:?})")]
    InadmissibleValue {
        /// The question being answered.
        question_id: QuestionId,
        /// The question's declared answer type.
        answer_type: AnswerType,
        /// The rejected value.
        value: AnswerValue,
    },
}

/// A single answer value.
///
/// Adjacently tagged so text answers carry their payload:
/// `{"kind": "yes"}`, `{"kind": "text", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum AnswerValue {
    /// The control/question is implemented or affirmed.
    Yes,
    /// Not implemented.
    No,
    /// Partially implemented.
    Partial,
    /// Not applicable to this organization.
    NotApplicable,
    /// Free-text response.
    Text(String),
}

impl AnswerValue {
    /// Whether this value is admissible for the given answer type.
    pub fn admissible_for(&self, answer_type: AnswerType) -> bool {
        match answer_type {
            AnswerType::YesNo => matches!(self, Self::Yes | Self::No),
            AnswerType::YesNoPartial => matches!(self, Self::Yes | Self::No | Self::Partial),
            AnswerType::YesNoNa => matches!(self, Self::Yes | Self::No | Self::NotApplicable),
            AnswerType::Text => matches!(self, Self::Text(_)),
        }
    }
}

/// An answer with optional assessor notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The answer value.
    pub value: AnswerValue,
    /// Free-form assessor notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Answer {
    /// Convenience constructor for an answer without notes.
    pub fn of(value: AnswerValue) -> Self {
        Self { value, notes: None }
    }
}

/// Per-assessment answer storage.
///
/// Materialized blank when a framework is selected: the sheet knows
/// every question of the framework (with its answer type) but holds no
/// answers yet. Recording validates the question exists and the value is
/// admissible; answers may be overwritten freely (back-navigation edits).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSheet {
    admissible: HashMap<QuestionId, AnswerType>,
    answers: HashMap<QuestionId, Answer>,
}

impl AnswerSheet {
    /// Materialize a blank sheet for the given control list.
    pub fn blank(controls: &[Control]) -> Self {
        let admissible = controls
            .iter()
            .flat_map(|c| &c.questions)
            .map(|q| (q.id.clone(), q.answer_type))
            .collect();
        Self {
            admissible,
            answers: HashMap::new(),
        }
    }

    /// Record an answer, replacing any previous answer to the question.
    ///
    /// # Errors
    ///
    /// [`AnswerError::UnknownQuestion`] if the question is not part of
    /// the materialized framework; [`AnswerError::InadmissibleValue`] if
    /// the value does not fit the question's answer type.
    pub fn record(&mut self, question_id: QuestionId, answer: Answer) -> Result<(), AnswerError> {
        let answer_type = *self
            .admissible
            .get(&question_id)
            .ok_or_else(|| AnswerError::UnknownQuestion(question_id.clone()))?;

        if !answer.value.admissible_for(answer_type) {
            return Err(AnswerError::InadmissibleValue {
                question_id,
                answer_type,
                value: answer.value,
            });
        }

        self.answers.insert(question_id, answer);
        Ok(())
    }

    /// Look up the answer to a question, if any.
    pub fn get(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Whether a question has been answered.
    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.answers.contains_key(question_id)
    }

    /// Number of recorded answers.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Total number of questions the sheet was materialized with.
    pub fn question_count(&self) -> usize {
        self.admissible.len()
    }
}
