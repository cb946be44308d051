//! # assure-cli — CLI Tool for the Assure Stack
//!
//! Provides the `assure` command-line interface for working with the
//! compliance catalog and answer files offline, without a running API.
//!
//! ## Subcommands
//!
//! - `assure frameworks` — list the framework catalog, or show one
//!   framework's controls and questions.
//! - `assure validate` — check an answers file against a framework.
//! - `assure score` — compute the compliance score for an answers file.
//!
//! Answer files are JSON maps from question ID to answer:
//!
//! ```json
//! {
//!   "gdpr-art32-q1": { "value": { "kind": "yes" } },
//!   "gdpr-art32-q3": { "value": { "kind": "text", "value": "WAF in front" } }
//! }
//! ```

pub mod answers;
pub mod frameworks;
pub mod score;
pub mod validate;
