//! # Validate Subcommand
//!
//! Checks an answers file against a framework: every answer must name a
//! known question and carry an admissible value, and every required
//! question must be answered. Prints a report and exits non-zero on any
//! finding, so the check can gate a CI pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use assure_catalog::{CatalogProvider, InMemoryCatalog};
use assure_core::FrameworkId;

use crate::answers::{apply_answers, load_answer_file, missing_required};

/// Arguments for the `assure validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON answers file.
    #[arg(value_name = "ANSWERS")]
    pub path: PathBuf,

    /// Framework to validate against (e.g., "gdpr").
    #[arg(long, short)]
    pub framework: String,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the file is complete and admissible,
/// 1 on any validation finding.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let catalog = InMemoryCatalog::with_samples();
    let id = FrameworkId::new(&args.framework)?;
    let Some(framework) = catalog.framework(&id) else {
        eprintln!("unknown framework \"{id}\"");
        return Ok(1);
    };

    let answers = load_answer_file(&args.path)?;
    let answered = answers.len();
    let applied = apply_answers(&framework, answers);
    let missing = missing_required(&framework.controls, &applied.sheet);

    tracing::info!(
        framework = %id,
        answered,
        rejected = applied.rejections.len(),
        missing = missing.len(),
        "answers file validated"
    );

    for (question, reason) in &applied.rejections {
        println!("  REJECT: {question} — {reason}");
    }
    for question in &missing {
        println!("  MISSING: {question} (required)");
    }

    let findings = applied.rejections.len() + missing.len();
    if findings > 0 {
        println!(
            "\n{} finding(s) against framework \"{}\" ({} answer(s) in file).",
            findings, id, answered
        );
        Ok(1)
    } else {
        println!("OK: {answered} answer(s) valid and complete for framework \"{id}\".");
        Ok(0)
    }
}
