//! # Temporal Types
//!
//! UTC-only timestamp type for the Assure Stack. All timestamps are kept
//! in UTC with second-level precision and a `Z` suffix in serialized form.
//!
//! ## Design Decision
//!
//! Assessment transition logs and API response envelopes are compared
//! across sessions and in tests. To prevent ambiguity, all timestamps are
//! UTC; local time conversion is a presentation concern handled by the
//! consuming dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A UTC timestamp with second-level precision.
///
/// Serializes to ISO 8601 format with `Z` suffix, truncated to seconds
/// (e.g., `2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let dt = DateTime::parse_from_rfc3339(&raw)
            .map_err(serde::de::Error::custom)?
            .with_timezone(&Utc);
        Ok(Self(dt))
    }
}

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Return the timestamp as an ISO 8601 string with Z suffix,
    /// truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn canonical_string_truncates_to_seconds() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.to_canonical_string(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn display_matches_canonical_string() {
        let ts = Timestamp::now();
        assert_eq!(format!("{ts}"), ts.to_canonical_string());
    }

    #[test]
    fn serializes_truncated_to_seconds() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        let ts = Timestamp::from_datetime(dt);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-01-15T12:00:00Z\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_canonical_string(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<Timestamp>("\"not-a-date\"").is_err());
        assert!(serde_json::from_str::<Timestamp>("42").is_err());
    }

    #[test]
    fn from_datetime_preserves_instant() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 15).unwrap();
        let ts: Timestamp = dt.into();
        assert_eq!(*ts.as_datetime(), dt);
    }
}
