//! # Per-Client Rate Limiting
//!
//! Simple token-bucket rate limiter keyed by bearer token. Part of the
//! mock backend's simulated service behavior: clients that hammer the
//! API get 429s with the standard error envelope, exactly as a real
//! gateway would answer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parking_lot::RwLock;

use crate::error::ErrorBody;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u64,
    /// Window duration in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 1000,
            window_secs: 60,
        }
    }
}

/// Per-key rate limit state.
#[derive(Debug, Clone)]
struct BucketState {
    count: u64,
    window_start: Instant,
}

/// Shared rate limiter state.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: Arc<RwLock<HashMap<String, BucketState>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check if a request from the given key should be allowed.
    fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.write();
        let now = Instant::now();

        let bucket = buckets.entry(key.to_string()).or_insert(BucketState {
            count: 0,
            window_start: now,
        });

        if now.duration_since(bucket.window_start).as_secs() >= self.config.window_secs {
            bucket.count = 0;
            bucket.window_start = now;
        }

        if bucket.count >= self.config.max_requests {
            false
        } else {
            bucket.count += 1;
            true
        }
    }
}

/// Middleware that enforces per-client rate limits.
///
/// The rate limit key is the bearer token from the `Authorization`
/// header. If no header is present, the key defaults to `"anonymous"`.
pub async fn rate_limit_middleware(request: Request, next: Next) -> Response {
    let limiter = request.extensions().get::<RateLimiter>().cloned();

    if let Some(limiter) = limiter {
        let key = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or("anonymous")
            .to_string();

        if !limiter.check(&key) {
            tracing::warn!(key_len = key.len(), "rate limit exceeded");
            let body = ErrorBody::new("RATE_LIMITED", "rate limit exceeded");
            return (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_max_then_rejects() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 3,
            window_secs: 60,
        });
        assert!(limiter.check("client-a"));
        assert!(limiter.check("client-a"));
        assert!(limiter.check("client-a"));
        assert!(!limiter.check("client-a"));
    }

    #[test]
    fn keys_have_independent_buckets() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window_secs: 60,
        });
        assert!(limiter.check("client-a"));
        assert!(!limiter.check("client-a"));
        assert!(limiter.check("client-b"));
    }

    #[test]
    fn window_of_zero_seconds_resets_immediately() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window_secs: 0,
        });
        assert!(limiter.check("client-a"));
        // With a zero-length window the bucket resets on every check.
        assert!(limiter.check("client-a"));
    }
}
