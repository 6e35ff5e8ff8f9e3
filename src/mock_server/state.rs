//! Mock server state management.
//!
//! Holds the fixture store, the route table and the per-test overrides for
//! one mock AnimaLineage backend.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::UnhandledPolicy;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::mock_api::{Dispatch, FixtureStore, Method, MockRequest, Router};

/// Shared state for the mock server.
///
/// The fixture store is immutable and shared behind an `Arc`; only the
/// router's override list changes during a test run. The whole struct is
/// wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Clone)]
pub struct MockState {
    /// Dataset served by the handlers.
    pub fixtures: Arc<FixtureStore>,

    /// Route table and per-test overrides.
    pub router: Router,

    /// What to do with requests no route matches.
    pub unhandled: UnhandledPolicy,
}

impl Default for MockState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl MockState {
    /// Create state serving `fixtures` under the default base path.
    pub fn new(fixtures: FixtureStore) -> Self {
        Self {
            fixtures: Arc::new(fixtures),
            router: Router::default(),
            unhandled: UnhandledPolicy::default(),
        }
    }

    /// State with the standard seed dataset.
    pub fn seeded() -> Self {
        Self::new(FixtureStore::seeded())
    }

    /// State with no data at all.
    pub fn empty() -> Self {
        Self::new(FixtureStore::empty())
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Serve every endpoint under `base_path` instead of `/api`.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.router = Router::new(base_path);
        self
    }

    /// Use a custom route table.
    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    pub fn with_unhandled(mut self, unhandled: UnhandledPolicy) -> Self {
        self.unhandled = unhandled;
        self
    }

    /// Route and handle one request.
    pub fn dispatch(&self, request: &MockRequest) -> Result<Dispatch> {
        self.router.dispatch(&self.fixtures, request)
    }

    /// Answer `method pattern` (relative to the base path) with `response`
    /// until [`reset_overrides`](Self::reset_overrides).
    pub fn use_override(&mut self, method: Method, pattern: &str, response: Envelope) {
        self.router.use_override(method, pattern, response);
    }

    /// Drop all per-test overrides.
    pub fn reset_overrides(&mut self) {
        self.router.reset_overrides();
    }
}
