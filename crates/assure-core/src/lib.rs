#![deny(missing_docs)]

//! # assure-core — Foundational Types for the Assure Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only
//! `serde`, `thiserror`, `chrono`, and `uuid` from the external
//! ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`ControlId`] where a
//!    [`FrameworkId`] is expected.
//!
//! 2. **[`ComplianceScore`] enforces its range at construction.** A score
//!    outside `[0, 1]` is unrepresentable; status classification lives on
//!    the score type so the thresholds cannot be applied inconsistently.
//!
//! 3. **Structured errors with `thiserror`.** [`ValidationError`] carries
//!    the rejected input — no `Box<dyn Error>`, no `.unwrap()` outside
//!    tests.

pub mod error;
pub mod identity;
pub mod score;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use error::ValidationError;
pub use identity::{AssessmentId, ControlId, FrameworkId, QuestionId};
pub use score::{ComplianceScore, ComplianceStatus, COMPLIANT_THRESHOLD, PARTIAL_THRESHOLD};
pub use temporal::Timestamp;
