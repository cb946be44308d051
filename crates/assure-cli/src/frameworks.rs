//! # Frameworks Subcommand
//!
//! Lists the seeded framework catalog, or prints one framework's
//! controls and questions when an ID is given.

use anyhow::Result;
use clap::Args;

use assure_catalog::{CatalogProvider, InMemoryCatalog};
use assure_core::FrameworkId;

/// Arguments for the `assure frameworks` subcommand.
#[derive(Args, Debug)]
pub struct FrameworksArgs {
    /// Framework to show in detail (e.g., "gdpr"). Omit to list all.
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Emit JSON instead of the human-readable table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the frameworks subcommand.
///
/// Returns exit code: 0 on success, 1 when the framework is unknown.
pub fn run_frameworks(args: &FrameworksArgs) -> Result<u8> {
    let catalog = InMemoryCatalog::with_samples();

    match &args.id {
        None => {
            let summaries = catalog.frameworks();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
                return Ok(0);
            }
            for summary in &summaries {
                println!(
                    "{:<12} {:<44} v{:<10} {} controls",
                    summary.id.as_str(),
                    summary.name,
                    summary.version,
                    summary.control_count
                );
            }
            Ok(0)
        }
        Some(raw) => {
            let id = FrameworkId::new(raw)?;
            let Some(framework) = catalog.framework(&id) else {
                eprintln!("unknown framework \"{id}\"");
                return Ok(1);
            };

            if args.json {
                println!("{}", serde_json::to_string_pretty(&framework)?);
                return Ok(0);
            }

            println!("{} — {} (v{})", framework.id, framework.name, framework.version);
            for control in &framework.controls {
                println!("\n  {} [{}] {}", control.id, control.category, control.title);
                for question in &control.questions {
                    let marks = match (question.required, question.primary) {
                        (true, true) => " (required, primary)",
                        (true, false) => " (required)",
                        (false, true) => " (primary)",
                        (false, false) => "",
                    };
                    println!("    {}{}: {}", question.id, marks, question.prompt);
                }
            }
            Ok(0)
        }
    }
}
