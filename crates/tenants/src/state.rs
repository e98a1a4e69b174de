//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::clock::Clock;
use crate::session::SessionVerifier;
use crate::store::TenantStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    shared_secret: SecretString,
    trial_days: u32,
    store: Arc<dyn TenantStore>,
    sessions: Arc<dyn SessionVerifier>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `shared_secret` - Secret callers present to fetch or create tenants
    /// * `trial_days` - Days a new tenant stays on the commercial tier
    /// * `store` - Tenant persistence
    /// * `sessions` - Session token verification
    /// * `clock` - Time source for creation timestamps
    #[must_use]
    pub fn new(
        shared_secret: SecretString,
        trial_days: u32,
        store: Arc<dyn TenantStore>,
        sessions: Arc<dyn SessionVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                shared_secret,
                trial_days,
                store,
                sessions,
                clock,
            }),
        }
    }

    /// Compare a caller-supplied secret with the configured one in constant time.
    #[must_use]
    pub fn secret_matches(&self, candidate: &str) -> bool {
        let expected = self.inner.shared_secret.expose_secret().as_bytes();
        expected.ct_eq(candidate.as_bytes()).into()
    }

    /// Days a newly created tenant stays on the commercial tier.
    #[must_use]
    pub fn trial_days(&self) -> u32 {
        self.inner.trial_days
    }

    /// Get a reference to the tenant store.
    #[must_use]
    pub fn store(&self) -> &dyn TenantStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the session verifier.
    #[must_use]
    pub fn sessions(&self) -> &dyn SessionVerifier {
        self.inner.sessions.as_ref()
    }

    /// Get a reference to the clock.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }
}
