//! # Score Subcommand
//!
//! Offline compliance scoring: applies an answers file to a framework
//! and prints the aggregate score, status, and per-control breakdown —
//! the same computation the API performs at the wizard's review step.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use assure_assess::score_assessment;
use assure_catalog::{CatalogProvider, InMemoryCatalog};
use assure_core::FrameworkId;

use crate::answers::{apply_answers, load_answer_file};

/// Arguments for the `assure score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the JSON answers file.
    #[arg(value_name = "ANSWERS")]
    pub path: PathBuf,

    /// Framework to score against (e.g., "gdpr").
    #[arg(long, short)]
    pub framework: String,

    /// Emit the full result as JSON instead of the summary.
    #[arg(long)]
    pub json: bool,

    /// Fail (exit 1) when answers are rejected instead of scoring the
    /// remainder.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the score subcommand.
///
/// Returns exit code: 0 on success, 1 under `--strict` when any answer
/// was rejected.
pub fn run_score(args: &ScoreArgs) -> Result<u8> {
    let catalog = InMemoryCatalog::with_samples();
    let id = FrameworkId::new(&args.framework)?;
    let framework = catalog
        .framework(&id)
        .ok_or_else(|| anyhow::anyhow!("unknown framework \"{id}\""))?;

    let answers = load_answer_file(&args.path)?;
    let applied = apply_answers(&framework, answers);

    for (question, reason) in &applied.rejections {
        eprintln!("  REJECT: {question} — {reason}");
    }
    if args.strict && !applied.rejections.is_empty() {
        eprintln!(
            "\n{} answer(s) rejected; aborting under --strict.",
            applied.rejections.len()
        );
        return Ok(1);
    }

    let result = score_assessment(id.clone(), &framework.controls, &applied.sheet)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(0);
    }

    println!(
        "{}: score {:.2} ({}) — {}/{} controls complete",
        id,
        result.score.value(),
        result.status,
        result.completed_controls,
        result.total_controls
    );
    for control in &result.control_statuses {
        println!(
            "  {:<16} {:<40} {}",
            control.control_id.as_str(),
            control.title,
            control.status
        );
    }

    Ok(0)
}
