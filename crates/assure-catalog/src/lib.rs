//! # assure-catalog — Compliance Framework Catalog
//!
//! Defines the framework data model ([`Framework`], [`Control`],
//! [`Question`], [`AnswerType`]) and the [`CatalogProvider`] seam behind
//! which framework data lives. The scoring and wizard logic in
//! `assure-assess` consumes these types but never cares where they came
//! from, so a real backing service can replace the in-memory catalog
//! without touching assessment logic.
//!
//! ## Invariants enforced at construction
//!
//! - A framework has at least one control. Empty frameworks are rejected
//!   here rather than producing a divide-by-zero downstream in scoring.
//! - A control has at least one question, exactly one of which is marked
//!   as the primary implementation question.

pub mod model;
pub mod provider;
pub mod samples;

pub use model::{AnswerType, CatalogError, Control, Framework, FrameworkSummary, Question};
pub use provider::{CatalogProvider, InMemoryCatalog};
