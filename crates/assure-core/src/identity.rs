//! # Domain Identifiers
//!
//! Newtypes for framework, control, question, and assessment identifiers.
//! Frameworks, controls, and questions are addressed by human-readable
//! string slugs that originate in the catalog (e.g., `"gdpr"`,
//! `"gdpr-art32"`); assessments are runtime sessions and use UUIDs.
//!
//! ## Validation
//!
//! The string-based identifiers are validated to be non-empty at
//! construction time. [`AssessmentId`] is UUID-based and always valid by
//! construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A compliance framework identifier (e.g., `"gdpr"`, `"iso-27001"`).
///
/// # Validation
///
/// Must be a non-empty string. No further format restrictions are imposed
/// because framework naming varies across catalog sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameworkId(String);

impl FrameworkId {
    /// Create a framework identifier, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFrameworkId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::InvalidFrameworkId);
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A control identifier within a framework (e.g., `"gdpr-art32"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlId(String);

impl ControlId {
    /// Create a control identifier, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidControlId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::InvalidControlId);
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question identifier within a control (e.g., `"gdpr-art32-q1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create a question identifier, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidQuestionId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::InvalidQuestionId);
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(Uuid);

impl AssessmentId {
    /// Create a new random assessment identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an assessment identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
