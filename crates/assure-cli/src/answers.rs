//! # Answer File Loading
//!
//! Shared loader for the JSON answer files consumed by `validate` and
//! `score`: a map from question ID to [`Answer`].

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use assure_assess::{Answer, AnswerSheet};
use assure_catalog::{Control, Framework};
use assure_core::QuestionId;

/// Load an answers file into an ordered map.
///
/// A `BTreeMap` keeps reporting order stable across runs.
pub fn load_answer_file(path: &Path) -> Result<BTreeMap<String, Answer>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse answers file {}", path.display()))
}

/// Outcome of applying an answers file to a framework.
pub struct AppliedAnswers {
    /// The materialized sheet with all admissible answers recorded.
    pub sheet: AnswerSheet,
    /// Per-answer rejections (unknown question, inadmissible value),
    /// keyed by question ID.
    pub rejections: Vec<(String, String)>,
}

/// Materialize a blank sheet for `framework` and record every answer
/// from the file, collecting rejections instead of stopping at the
/// first one.
pub fn apply_answers(framework: &Framework, answers: BTreeMap<String, Answer>) -> AppliedAnswers {
    let mut sheet = AnswerSheet::blank(&framework.controls);
    let mut rejections = Vec::new();

    for (raw_id, answer) in answers {
        let question_id = match QuestionId::new(&raw_id) {
            Ok(id) => id,
            Err(err) => {
                rejections.push((raw_id, err.to_string()));
                continue;
            }
        };
        if let Err(err) = sheet.record(question_id, answer) {
            rejections.push((raw_id, err.to_string()));
        }
    }

    AppliedAnswers { sheet, rejections }
}

/// Collect the required questions of `controls` that `sheet` leaves
/// unanswered, in control order.
pub fn missing_required(controls: &[Control], sheet: &AnswerSheet) -> Vec<QuestionId> {
    controls
        .iter()
        .flat_map(Control::required_questions)
        .filter(|q| !sheet.is_answered(&q.id))
        .map(|q| q.id.clone())
        .collect()
}
