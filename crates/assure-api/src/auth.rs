//! # Authentication Middleware
//!
//! Bearer-presence middleware matching the mock backend's contract: a
//! request is authenticated when it carries
//! `Authorization: Bearer <token>` with a token longer than 20
//! characters. This is a header-presence check, not a real verification
//! — the dashboards never had one.
//!
//! When the server is configured with an expected token, the presented
//! token is additionally compared in constant time, so a deployed mock
//! cannot be driven with an arbitrary string.

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::error::ApiError;

/// Minimum bearer token length; anything at or below is rejected.
pub const MIN_TOKEN_LEN: usize = 20;

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the token value to prevent credential leakage
/// in logs.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Expected bearer token, if configured.
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Extract and check the bearer token from the Authorization header.
fn check_bearer(request: &Request, config: &AuthConfig) -> Result<(), ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".to_string()))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("expected a Bearer token".to_string()))?;

    if token.len() <= MIN_TOKEN_LEN {
        return Err(ApiError::Unauthorized(format!(
            "bearer token must be longer than {MIN_TOKEN_LEN} characters"
        )));
    }

    if let Some(expected) = &config.token {
        let matches: bool = token.as_bytes().ct_eq(expected.as_bytes()).into();
        if !matches {
            return Err(ApiError::Unauthorized("invalid bearer token".to_string()));
        }
    }

    Ok(())
}

/// Middleware rejecting requests without an acceptable bearer token.
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let config = request
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .unwrap_or_default();

    match check_bearer(&request, &config) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_auth(value: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/v1/compliance/frameworks");
        if let Some(v) = value {
            builder = builder.header("authorization", v);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn missing_header_rejected() {
        let err = check_bearer(&request_with_auth(None), &AuthConfig::default()).unwrap_err();
        assert!(format!("{err}").contains("missing"));
    }

    #[test]
    fn non_bearer_scheme_rejected() {
        let req = request_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert!(check_bearer(&req, &AuthConfig::default()).is_err());
    }

    #[test]
    fn short_token_rejected() {
        let req = request_with_auth(Some("Bearer short"));
        assert!(check_bearer(&req, &AuthConfig::default()).is_err());

        // Exactly 20 characters is still too short.
        let req = request_with_auth(Some(&format!("Bearer {}", "a".repeat(20))));
        assert!(check_bearer(&req, &AuthConfig::default()).is_err());
    }

    #[test]
    fn long_token_accepted_without_configured_secret() {
        let req = request_with_auth(Some(&format!("Bearer {}", "a".repeat(21))));
        assert!(check_bearer(&req, &AuthConfig::default()).is_ok());
    }

    #[test]
    fn configured_token_must_match() {
        let config = AuthConfig {
            token: Some("the-expected-token-value-123".to_string()),
        };

        let good = request_with_auth(Some("Bearer the-expected-token-value-123"));
        assert!(check_bearer(&good, &config).is_ok());

        let bad = request_with_auth(Some(&format!("Bearer {}", "b".repeat(28))));
        assert!(check_bearer(&bad, &config).is_err());
    }

    #[test]
    fn debug_redacts_token() {
        let config = AuthConfig {
            token: Some("super-secret".to_string()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
