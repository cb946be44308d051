//! # API Route Modules
//!
//! Route modules for the mock compliance backend, all under
//! `/api/v1/compliance`:
//!
//! - `frameworks` — read-only framework catalog (listing, detail,
//!   per-framework controls).
//! - `assessments` — assessment wizard sessions: start, answer,
//!   advance/back, submit.
//! - `statistics` — dashboard summary computed from submitted
//!   assessments.

pub mod assessments;
pub mod frameworks;
pub mod statistics;
