//! # Compliance Score & Status
//!
//! The score primitive shared by the scoring engine, the API layer, and
//! the CLI. A [`ComplianceScore`] is a float in the closed unit interval;
//! the constructor rejects anything else (including NaN), so downstream
//! code never needs to re-validate.
//!
//! ## Status Thresholds
//!
//! Classification into [`ComplianceStatus`] uses fixed thresholds that
//! are part of the product's scoring contract and must not drift:
//!
//! ```text
//! score >= 0.8          → compliant
//! 0.5 <= score < 0.8    → partially-compliant
//! score < 0.5           → non-compliant
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Threshold at or above which a score is classified compliant.
pub const COMPLIANT_THRESHOLD: f64 = 0.8;

/// Threshold at or above which a score is classified partially compliant.
pub const PARTIAL_THRESHOLD: f64 = 0.5;

/// A compliance score in `[0, 1]`.
///
/// Construction validates the range, rejecting NaN and out-of-range
/// values. Serializes as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ComplianceScore(f64);

impl ComplianceScore {
    /// Create a score, validating that the value lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidScore`] for NaN or values
    /// outside the closed unit interval.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::InvalidScore { value });
        }
        Ok(Self(value))
    }

    /// Access the raw score value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Classify this score into a status per the fixed thresholds.
    pub fn status(&self) -> ComplianceStatus {
        if self.0 >= COMPLIANT_THRESHOLD {
            ComplianceStatus::Compliant
        } else if self.0 >= PARTIAL_THRESHOLD {
            ComplianceStatus::PartiallyCompliant
        } else {
            ComplianceStatus::NonCompliant
        }
    }
}

impl TryFrom<f64> for ComplianceScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ComplianceScore> for f64 {
    fn from(score: ComplianceScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for ComplianceScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Overall or per-control compliance classification.
///
/// Serialized in kebab-case to match the dashboard wire contract
/// (`"compliant"`, `"partially-compliant"`, `"non-compliant"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    /// All or nearly all controls are implemented.
    Compliant,
    /// A material share of controls are implemented or partial.
    PartiallyCompliant,
    /// Less than half of the controls are implemented.
    NonCompliant,
}

impl ComplianceStatus {
    /// The canonical wire-format name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::PartiallyCompliant => "partially-compliant",
            Self::NonCompliant => "non-compliant",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn score_accepts_unit_interval_bounds() {
        assert!(ComplianceScore::new(0.0).is_ok());
        assert!(ComplianceScore::new(1.0).is_ok());
        assert!(ComplianceScore::new(0.5).is_ok());
    }

    #[test]
    fn score_rejects_out_of_range() {
        assert!(ComplianceScore::new(-0.01).is_err());
        assert!(ComplianceScore::new(1.01).is_err());
    }

    #[test]
    fn score_rejects_nan_and_infinity() {
        assert!(ComplianceScore::new(f64::NAN).is_err());
        assert!(ComplianceScore::new(f64::INFINITY).is_err());
        assert!(ComplianceScore::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn status_threshold_boundaries() {
        // Exactly at the thresholds.
        let at_compliant = ComplianceScore::new(0.8).unwrap();
        assert_eq!(at_compliant.status(), ComplianceStatus::Compliant);

        let at_partial = ComplianceScore::new(0.5).unwrap();
        assert_eq!(at_partial.status(), ComplianceStatus::PartiallyCompliant);

        // Just below.
        let below_compliant = ComplianceScore::new(0.79).unwrap();
        assert_eq!(
            below_compliant.status(),
            ComplianceStatus::PartiallyCompliant
        );

        let below_partial = ComplianceScore::new(0.49).unwrap();
        assert_eq!(below_partial.status(), ComplianceStatus::NonCompliant);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&ComplianceStatus::PartiallyCompliant).unwrap();
        assert_eq!(json, "\"partially-compliant\"");
        let json = serde_json::to_string(&ComplianceStatus::NonCompliant).unwrap();
        assert_eq!(json, "\"non-compliant\"");
    }

    #[test]
    fn score_serde_roundtrip_preserves_value() {
        let score = ComplianceScore::new(0.9).unwrap();
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, "0.9");
        let back: ComplianceScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, score);
    }

    #[test]
    fn score_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<ComplianceScore>("1.5").is_err());
        assert!(serde_json::from_str::<ComplianceScore>("-0.2").is_err());
    }

    proptest! {
        #[test]
        fn status_is_total_over_valid_scores(value in 0.0f64..=1.0) {
            let score = ComplianceScore::new(value).unwrap();
            // Every valid score maps to exactly one status, consistent
            // with the threshold constants.
            let status = score.status();
            if value >= COMPLIANT_THRESHOLD {
                prop_assert_eq!(status, ComplianceStatus::Compliant);
            } else if value >= PARTIAL_THRESHOLD {
                prop_assert_eq!(status, ComplianceStatus::PartiallyCompliant);
            } else {
                prop_assert_eq!(status, ComplianceStatus::NonCompliant);
            }
        }
    }
}
