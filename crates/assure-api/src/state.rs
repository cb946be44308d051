//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! The mock backend owns three things:
//! - **Catalog** — read-only framework data behind the
//!   [`CatalogProvider`] seam, so a real catalog service can replace the
//!   seeded in-memory one without touching handlers.
//! - **Sessions** — live assessment wizard sessions, keyed by UUID.
//! - **Submissions** — completed assessment results, the input to the
//!   statistics endpoint.
//!
//! Nothing is persisted; all state is scoped to the process lifetime,
//! matching the dashboards' in-memory session semantics.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use assure_assess::{AssessmentResult, AssessmentWizard};
use assure_catalog::{CatalogProvider, InMemoryCatalog};
use assure_core::{FrameworkId, Timestamp};

use crate::middleware::rate_limit::RateLimitConfig;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` is non-poisonable — a panicking writer does not
/// permanently corrupt the store.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure receives `&mut T` and may inspect the current state,
    /// validate preconditions, mutate the record, and return `Ok(R)` or
    /// `Err(E)`. The entire operation runs under a single write lock,
    /// eliminating TOCTOU races between read and update.
    ///
    /// Returns `None` if the record doesn't exist, or `Some(result)`
    /// with the closure's `Result`.
    pub fn try_update<R, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Records ------------------------------------------------------------------

/// A completed assessment, recorded by the wizard's completion handler
/// at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionRecord {
    /// The session that produced this result.
    pub assessment_id: Uuid,
    /// The assessed framework.
    #[schema(value_type = String)]
    pub framework_id: FrameworkId,
    /// The computed result.
    #[schema(value_type = Object)]
    pub result: AssessmentResult,
    /// When the assessment was submitted.
    #[schema(value_type = String)]
    pub submitted_at: Timestamp,
}

// -- Configuration ------------------------------------------------------------

/// Server configuration, read from the environment by `main`.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Expected bearer token. When unset, any bearer token longer than
    /// 20 characters passes the presence check.
    pub auth_token: Option<String>,
    /// Per-client request budget enforced by the rate-limit middleware.
    pub rate_limit: RateLimitConfig,
}

// -- AppState -----------------------------------------------------------------

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<AppConfig>,
    /// Framework catalog.
    pub catalog: Arc<dyn CatalogProvider>,
    /// Live wizard sessions.
    pub sessions: Store<AssessmentWizard>,
    /// Completed assessments.
    pub submissions: Store<SubmissionRecord>,
}

impl AppState {
    /// Create state with the seeded sample catalog and default config.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create state with the seeded sample catalog.
    pub fn with_config(config: AppConfig) -> Self {
        Self::with_catalog(config, Arc::new(InMemoryCatalog::with_samples()))
    }

    /// Create state with an explicit catalog implementation.
    pub fn with_catalog(config: AppConfig, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            sessions: Store::new(),
            submissions: Store::new(),
        }
    }

    /// Record a completed assessment. Called from the wizard's
    /// completion handler in the submit route.
    pub fn record_submission(&self, assessment_id: Uuid, result: &AssessmentResult) {
        self.submissions.insert(
            assessment_id,
            SubmissionRecord {
                assessment_id,
                framework_id: result.framework_id.clone(),
                result: result.clone(),
                submitted_at: Timestamp::now(),
            },
        );
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("sessions", &self.sessions.len())
            .field("submissions", &self.submissions.len())
            .finish()
    }
}
