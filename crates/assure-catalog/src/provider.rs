//! # Catalog Provider Seam
//!
//! The [`CatalogProvider`] trait is the narrow interface between
//! framework data and everything that consumes it (wizard, API, CLI).
//! The in-memory implementation ships with seeded sample frameworks; a
//! real backing service implements the same three methods.

use std::collections::HashMap;

use assure_core::FrameworkId;

use crate::model::{Control, Framework, FrameworkSummary};
use crate::samples;

/// Read-only access to the framework catalog.
///
/// Implementations must be cheap to call repeatedly — the API layer
/// queries the provider on every request rather than caching.
pub trait CatalogProvider: Send + Sync {
    /// List summaries of all available frameworks, in stable order.
    fn frameworks(&self) -> Vec<FrameworkSummary>;

    /// Fetch a full framework by identifier.
    fn framework(&self, id: &FrameworkId) -> Option<Framework>;

    /// Fetch the controls of a framework by identifier.
    fn controls(&self, id: &FrameworkId) -> Option<Vec<Control>> {
        self.framework(id).map(|f| f.controls)
    }
}

/// In-memory catalog keyed by framework identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    frameworks: HashMap<FrameworkId, Framework>,
    // Listing order is stable regardless of HashMap iteration order.
    order: Vec<FrameworkId>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog seeded with the sample frameworks
    /// (GDPR, HIPAA, ISO 27001).
    pub fn with_samples() -> Self {
        let mut catalog = Self::new();
        for framework in samples::sample_frameworks() {
            catalog.insert(framework);
        }
        catalog
    }

    /// Insert a framework, replacing any existing one with the same ID.
    pub fn insert(&mut self, framework: Framework) {
        let id = framework.id.clone();
        if self.frameworks.insert(id.clone(), framework).is_none() {
            self.order.push(id);
        }
    }

    /// Number of frameworks in the catalog.
    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn frameworks(&self) -> Vec<FrameworkSummary> {
        self.order
            .iter()
            .filter_map(|id| self.frameworks.get(id))
            .map(Framework::summary)
            .collect()
    }

    fn framework(&self, id: &FrameworkId) -> Option<Framework> {
        let found = self.frameworks.get(id).cloned();
        if found.is_none() {
            tracing::debug!(framework = %id, "framework not found in catalog");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_has_three_frameworks() {
        let catalog = InMemoryCatalog::with_samples();
        assert_eq!(catalog.len(), 3);

        let ids: Vec<String> = catalog
            .frameworks()
            .iter()
            .map(|s| s.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["gdpr", "hipaa", "iso-27001"]);
    }

    #[test]
    fn framework_lookup_round_trips() {
        let catalog = InMemoryCatalog::with_samples();
        let id = FrameworkId::new("gdpr").unwrap();
        let fw = catalog.framework(&id).unwrap();
        assert_eq!(fw.id, id);
        assert!(!fw.controls.is_empty());
    }

    #[test]
    fn unknown_framework_returns_none() {
        let catalog = InMemoryCatalog::with_samples();
        let id = FrameworkId::new("pci-dss").unwrap();
        assert!(catalog.framework(&id).is_none());
        assert!(catalog.controls(&id).is_none());
    }

    #[test]
    fn controls_match_framework_controls() {
        let catalog = InMemoryCatalog::with_samples();
        let id = FrameworkId::new("hipaa").unwrap();
        let fw = catalog.framework(&id).unwrap();
        let controls = catalog.controls(&id).unwrap();
        assert_eq!(controls, fw.controls);
    }

    #[test]
    fn insert_replaces_without_duplicating_order() {
        let mut catalog = InMemoryCatalog::with_samples();
        let id = FrameworkId::new("gdpr").unwrap();
        let fw = catalog.framework(&id).unwrap();
        catalog.insert(fw);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.frameworks().len(), 3);
    }
}
