//! # Framework Data Model
//!
//! A [`Framework`] is a named compliance standard (GDPR, HIPAA,
//! ISO 27001) composed of [`Control`]s; each control carries the
//! [`Question`]s an assessor answers. Frameworks are immutable during an
//! assessment run — the wizard snapshots the control list when a
//! framework is selected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use assure_core::{ControlId, FrameworkId, QuestionId};

/// Errors raised while constructing or loading catalog data.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A framework with no controls cannot be assessed (its score would
    /// be undefined), so it is rejected at construction.
    #[error("framework \"{framework_id}\" has no controls")]
    EmptyFramework {
        /// The offending framework.
        framework_id: FrameworkId,
    },

    /// A control must carry at least one question.
    #[error("control \"{control_id}\" has no questions")]
    NoQuestions {
        /// The offending control.
        control_id: ControlId,
    },

    /// A control must have exactly one primary implementation question;
    /// this control has none.
    #[error("control \"{control_id}\" has no primary question")]
    NoPrimaryQuestion {
        /// The offending control.
        control_id: ControlId,
    },

    /// A control must have exactly one primary implementation question;
    /// this control has more than one.
    #[error("control \"{control_id}\" has {count} primary questions (expected exactly 1)")]
    MultiplePrimaryQuestions {
        /// The offending control.
        control_id: ControlId,
        /// How many questions were marked primary.
        count: usize,
    },
}

/// The answer format a question admits.
///
/// Serialized in kebab-case to match the dashboard wire contract
/// (`"yes-no"`, `"yes-no-partial"`, `"yes-no-na"`, `"text"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerType {
    /// Binary yes/no.
    YesNo,
    /// Yes/no with a partial-implementation option.
    YesNoPartial,
    /// Yes/no with a not-applicable option.
    YesNoNa,
    /// Free-text response.
    Text,
}

/// A single question within a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier.
    pub id: QuestionId,
    /// The control this question belongs to.
    pub control_id: ControlId,
    /// The question text shown to the assessor.
    pub prompt: String,
    /// The answer format this question admits.
    pub answer_type: AnswerType,
    /// Whether an answer is required before advancing past the control.
    pub required: bool,
    /// Whether this is the control's implementation question — the
    /// primary compliance indicator used for status resolution.
    pub primary: bool,
}

/// A single compliance requirement within a framework
/// (e.g., "Security of processing").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Unique control identifier.
    pub id: ControlId,
    /// Short human-readable title.
    pub title: String,
    /// Grouping category (e.g., "Data Protection", "Access Control").
    pub category: String,
    /// The questions an assessor answers for this control.
    pub questions: Vec<Question>,
}

impl Control {
    /// Construct a control, validating the question invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoQuestions`] for an empty question list,
    /// and [`CatalogError::NoPrimaryQuestion`] /
    /// [`CatalogError::MultiplePrimaryQuestions`] when the primary
    /// marker is absent or duplicated.
    pub fn new(
        id: ControlId,
        title: impl Into<String>,
        category: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::NoQuestions { control_id: id });
        }
        let primary_count = questions.iter().filter(|q| q.primary).count();
        match primary_count {
            0 => return Err(CatalogError::NoPrimaryQuestion { control_id: id }),
            1 => {}
            count => {
                return Err(CatalogError::MultiplePrimaryQuestions {
                    control_id: id,
                    count,
                })
            }
        }
        Ok(Self {
            id,
            title: title.into(),
            category: category.into(),
            questions,
        })
    }

    /// The control's primary implementation question.
    ///
    /// The construction invariant guarantees exactly one exists.
    pub fn primary_question(&self) -> &Question {
        self.questions
            .iter()
            .find(|q| q.primary)
            .unwrap_or(&self.questions[0])
    }

    /// Iterator over the required questions of this control.
    pub fn required_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.required)
    }
}

/// A named compliance standard composed of controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Framework {
    /// Unique framework identifier.
    pub id: FrameworkId,
    /// Display name (e.g., "General Data Protection Regulation").
    pub name: String,
    /// Framework version string (e.g., "2016/679").
    pub version: String,
    /// The controls that make up the framework.
    pub controls: Vec<Control>,
}

impl Framework {
    /// Construct a framework, rejecting an empty control list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyFramework`] if `controls` is empty.
    pub fn new(
        id: FrameworkId,
        name: impl Into<String>,
        version: impl Into<String>,
        controls: Vec<Control>,
    ) -> Result<Self, CatalogError> {
        if controls.is_empty() {
            return Err(CatalogError::EmptyFramework { framework_id: id });
        }
        Ok(Self {
            id,
            name: name.into(),
            version: version.into(),
            controls,
        })
    }

    /// Produce the summary view used by listing endpoints.
    pub fn summary(&self) -> FrameworkSummary {
        FrameworkSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            control_count: self.controls.len(),
        }
    }

    /// Look up a control by identifier.
    pub fn control(&self, id: &ControlId) -> Option<&Control> {
        self.controls.iter().find(|c| &c.id == id)
    }
}

/// Lightweight framework view for listing endpoints, without the full
/// control tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    /// Unique framework identifier.
    pub id: FrameworkId,
    /// Display name.
    pub name: String,
    /// Framework version string.
    pub version: String,
    /// Number of controls in the framework.
    pub control_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, control: &str, primary: bool) -> Question {
        Question {
            id: QuestionId::new(id).unwrap(),
            control_id: ControlId::new(control).unwrap(),
            prompt: "Is the control implemented?".to_string(),
            answer_type: AnswerType::YesNoPartial,
            required: true,
            primary,
        }
    }

    #[test]
    fn control_requires_questions() {
        let err = Control::new(
            ControlId::new("c1").unwrap(),
            "Access control",
            "Security",
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::NoQuestions { .. }));
    }

    #[test]
    fn control_requires_exactly_one_primary() {
        let none = Control::new(
            ControlId::new("c1").unwrap(),
            "Access control",
            "Security",
            vec![question("q1", "c1", false)],
        )
        .unwrap_err();
        assert!(matches!(none, CatalogError::NoPrimaryQuestion { .. }));

        let two = Control::new(
            ControlId::new("c1").unwrap(),
            "Access control",
            "Security",
            vec![question("q1", "c1", true), question("q2", "c1", true)],
        )
        .unwrap_err();
        assert!(matches!(
            two,
            CatalogError::MultiplePrimaryQuestions { count: 2, .. }
        ));
    }

    #[test]
    fn primary_question_lookup() {
        let control = Control::new(
            ControlId::new("c1").unwrap(),
            "Access control",
            "Security",
            vec![question("q1", "c1", false), question("q2", "c1", true)],
        )
        .unwrap();
        assert_eq!(control.primary_question().id.as_str(), "q2");
    }

    #[test]
    fn framework_rejects_empty_controls() {
        let err =
            Framework::new(FrameworkId::new("gdpr").unwrap(), "GDPR", "2016/679", vec![])
                .unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("gdpr"));
        assert!(msg.contains("no controls"));
    }

    #[test]
    fn framework_summary_counts_controls() {
        let control = Control::new(
            ControlId::new("c1").unwrap(),
            "Access control",
            "Security",
            vec![question("q1", "c1", true)],
        )
        .unwrap();
        let fw = Framework::new(
            FrameworkId::new("iso-27001").unwrap(),
            "ISO/IEC 27001",
            "2022",
            vec![control],
        )
        .unwrap();
        let summary = fw.summary();
        assert_eq!(summary.control_count, 1);
        assert_eq!(summary.id.as_str(), "iso-27001");
    }

    #[test]
    fn answer_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&AnswerType::YesNoPartial).unwrap(),
            "\"yes-no-partial\""
        );
        assert_eq!(
            serde_json::to_string(&AnswerType::YesNoNa).unwrap(),
            "\"yes-no-na\""
        );
    }
}
