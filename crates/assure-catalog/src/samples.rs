//! # Seeded Sample Frameworks
//!
//! In-memory sample data standing in for a real catalog service: GDPR,
//! HIPAA, and ISO 27001 with a representative subset of controls each.
//! Question identifiers are stable — tests and the CLI reference them.

use assure_core::{ControlId, FrameworkId, QuestionId};

use crate::model::{AnswerType, Control, Framework, Question};

/// Build the three seeded sample frameworks.
pub fn sample_frameworks() -> Vec<Framework> {
    vec![gdpr(), hipaa(), iso_27001()]
}

fn q(
    id: &str,
    control: &str,
    prompt: &str,
    answer_type: AnswerType,
    required: bool,
    primary: bool,
) -> Question {
    Question {
        id: QuestionId::new(id).expect("sample question IDs are non-empty"),
        control_id: ControlId::new(control).expect("sample control IDs are non-empty"),
        prompt: prompt.to_string(),
        answer_type,
        required,
        primary,
    }
}

fn control(id: &str, title: &str, category: &str, questions: Vec<Question>) -> Control {
    Control::new(
        ControlId::new(id).expect("sample control IDs are non-empty"),
        title,
        category,
        questions,
    )
    .expect("sample controls satisfy the catalog invariants")
}

fn framework(id: &str, name: &str, version: &str, controls: Vec<Control>) -> Framework {
    Framework::new(
        FrameworkId::new(id).expect("sample framework IDs are non-empty"),
        name,
        version,
        controls,
    )
    .expect("sample frameworks have at least one control")
}

fn gdpr() -> Framework {
    framework(
        "gdpr",
        "General Data Protection Regulation",
        "2016/679",
        vec![
            control(
                "gdpr-art6",
                "Lawfulness of processing",
                "Data Protection",
                vec![
                    q(
                        "gdpr-art6-q1",
                        "gdpr-art6",
                        "Is a lawful basis documented for each processing activity?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "gdpr-art6-q2",
                        "gdpr-art6",
                        "Is consent collected and recorded where consent is the basis?",
                        AnswerType::YesNoNa,
                        true,
                        false,
                    ),
                ],
            ),
            control(
                "gdpr-art15",
                "Data subject access requests",
                "Individual Rights",
                vec![
                    q(
                        "gdpr-art15-q1",
                        "gdpr-art15",
                        "Is a DSR handling process implemented with the one-month deadline?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "gdpr-art15-q2",
                        "gdpr-art15",
                        "Describe how data subject identity is verified.",
                        AnswerType::Text,
                        false,
                        false,
                    ),
                ],
            ),
            control(
                "gdpr-art30",
                "Records of processing activities",
                "Documentation",
                vec![
                    q(
                        "gdpr-art30-q1",
                        "gdpr-art30",
                        "Is a ROPA maintained and kept current?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "gdpr-art30-q2",
                        "gdpr-art30",
                        "Does the ROPA cover processors acting on your behalf?",
                        AnswerType::YesNoNa,
                        true,
                        false,
                    ),
                ],
            ),
            control(
                "gdpr-art32",
                "Security of processing",
                "Security",
                vec![
                    q(
                        "gdpr-art32-q1",
                        "gdpr-art32",
                        "Are technical and organisational security measures implemented?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "gdpr-art32-q2",
                        "gdpr-art32",
                        "Is personal data encrypted at rest and in transit?",
                        AnswerType::YesNo,
                        true,
                        false,
                    ),
                    q(
                        "gdpr-art32-q3",
                        "gdpr-art32",
                        "Note any compensating controls.",
                        AnswerType::Text,
                        false,
                        false,
                    ),
                ],
            ),
            control(
                "gdpr-art33",
                "Breach notification",
                "Incident Response",
                vec![
                    q(
                        "gdpr-art33-q1",
                        "gdpr-art33",
                        "Is a breach notification process implemented with the 72-hour deadline?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "gdpr-art33-q2",
                        "gdpr-art33",
                        "Is a breach register maintained?",
                        AnswerType::YesNo,
                        true,
                        false,
                    ),
                ],
            ),
        ],
    )
}

fn hipaa() -> Framework {
    framework(
        "hipaa",
        "Health Insurance Portability and Accountability Act",
        "Security Rule 2013",
        vec![
            control(
                "hipaa-164-308",
                "Administrative safeguards",
                "Administrative",
                vec![
                    q(
                        "hipaa-164-308-q1",
                        "hipaa-164-308",
                        "Is a security management process implemented, including risk analysis?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "hipaa-164-308-q2",
                        "hipaa-164-308",
                        "Is workforce security training conducted?",
                        AnswerType::YesNo,
                        true,
                        false,
                    ),
                ],
            ),
            control(
                "hipaa-164-310",
                "Physical safeguards",
                "Physical",
                vec![
                    q(
                        "hipaa-164-310-q1",
                        "hipaa-164-310",
                        "Are facility access controls implemented for systems handling ePHI?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "hipaa-164-310-q2",
                        "hipaa-164-310",
                        "Is workstation and device security addressed?",
                        AnswerType::YesNoNa,
                        true,
                        false,
                    ),
                ],
            ),
            control(
                "hipaa-164-312",
                "Technical safeguards",
                "Technical",
                vec![
                    q(
                        "hipaa-164-312-q1",
                        "hipaa-164-312",
                        "Are access controls and audit logging implemented for ePHI systems?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "hipaa-164-312-q2",
                        "hipaa-164-312",
                        "Is ePHI encrypted in transit?",
                        AnswerType::YesNo,
                        true,
                        false,
                    ),
                ],
            ),
            control(
                "hipaa-164-314",
                "Business associate agreements",
                "Organizational",
                vec![q(
                    "hipaa-164-314-q1",
                    "hipaa-164-314",
                    "Are BAAs in place with all business associates handling ePHI?",
                    AnswerType::YesNoPartial,
                    true,
                    true,
                )],
            ),
        ],
    )
}

fn iso_27001() -> Framework {
    framework(
        "iso-27001",
        "ISO/IEC 27001 Information Security Management",
        "2022",
        vec![
            control(
                "iso-27001-a5",
                "Information security policies",
                "Governance",
                vec![
                    q(
                        "iso-27001-a5-q1",
                        "iso-27001-a5",
                        "Are ISMS policies defined, approved, and communicated?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "iso-27001-a5-q2",
                        "iso-27001-a5",
                        "Are policies reviewed at planned intervals?",
                        AnswerType::YesNo,
                        true,
                        false,
                    ),
                ],
            ),
            control(
                "iso-27001-a6",
                "Risk assessment",
                "Risk Management",
                vec![
                    q(
                        "iso-27001-a6-q1",
                        "iso-27001-a6",
                        "Is an information security risk assessment process implemented?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "iso-27001-a6-q2",
                        "iso-27001-a6",
                        "Describe the risk acceptance criteria.",
                        AnswerType::Text,
                        false,
                        false,
                    ),
                ],
            ),
            control(
                "iso-27001-a8",
                "Access control",
                "Access Control",
                vec![
                    q(
                        "iso-27001-a8-q1",
                        "iso-27001-a8",
                        "Is access to information restricted per the access control policy?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "iso-27001-a8-q2",
                        "iso-27001-a8",
                        "Is privileged access separately managed and reviewed?",
                        AnswerType::YesNo,
                        true,
                        false,
                    ),
                ],
            ),
            control(
                "iso-27001-a16",
                "Incident management",
                "Incident Response",
                vec![q(
                    "iso-27001-a16-q1",
                    "iso-27001-a16",
                    "Is a security incident management process implemented?",
                    AnswerType::YesNoPartial,
                    true,
                    true,
                )],
            ),
            control(
                "iso-27001-a15",
                "Supplier relationships",
                "Third Party",
                vec![
                    q(
                        "iso-27001-a15-q1",
                        "iso-27001-a15",
                        "Are supplier security requirements agreed and monitored?",
                        AnswerType::YesNoPartial,
                        true,
                        true,
                    ),
                    q(
                        "iso-27001-a15-q2",
                        "iso-27001-a15",
                        "Is cloud service security addressed in supplier agreements?",
                        AnswerType::YesNoNa,
                        true,
                        false,
                    ),
                ],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_samples_satisfy_invariants() {
        // Construction panics on invariant violations, so reaching the
        // assertions means every sample control has exactly one primary
        // question and every framework has controls.
        let frameworks = sample_frameworks();
        assert_eq!(frameworks.len(), 3);
        for fw in &frameworks {
            assert!(!fw.controls.is_empty());
            for control in &fw.controls {
                assert_eq!(control.questions.iter().filter(|q| q.primary).count(), 1);
                assert!(control.primary_question().required);
            }
        }
    }

    #[test]
    fn question_control_ids_are_consistent() {
        for fw in sample_frameworks() {
            for control in &fw.controls {
                for question in &control.questions {
                    assert_eq!(question.control_id, control.id);
                }
            }
        }
    }

    #[test]
    fn sample_ids_are_unique() {
        let frameworks = sample_frameworks();
        let mut question_ids = std::collections::HashSet::new();
        for fw in &frameworks {
            for control in &fw.controls {
                for question in &control.questions {
                    assert!(
                        question_ids.insert(question.id.clone()),
                        "duplicate question ID: {}",
                        question.id
                    );
                }
            }
        }
    }
}
