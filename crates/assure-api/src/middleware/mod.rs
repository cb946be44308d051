//! # Middleware
//!
//! Request-level middleware for the mock backend: token-bucket rate
//! limiting and lightweight request metrics. Both are in-process only —
//! the backend simulates a service, it does not coordinate with one.

pub mod metrics;
pub mod rate_limit;
