//! Integration tests for the storefront tenants service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database, run migrations, start the service
//! cargo run -p storefront-tenants-cli -- migrate
//! cargo run -p storefront-tenants
//!
//! # Run integration tests
//! cargo test -p storefront-tenants-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `TENANTS_BASE_URL` - Service URL (default: `http://localhost:3000`)
//! - `TENANTS_SECRET` - Shared secret configured on the service

/// Base URL for the tenants service.
#[must_use]
pub fn base_url() -> String {
    std::env::var("TENANTS_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Shared secret the running service was started with.
///
/// # Panics
///
/// Panics if `TENANTS_SECRET` is not set; these tests cannot run without it.
#[must_use]
#[allow(clippy::expect_used)]
pub fn shared_secret() -> String {
    std::env::var("TENANTS_SECRET").expect("TENANTS_SECRET must be set for integration tests")
}

/// A slug no other test run will have used.
#[must_use]
pub fn unique_slug(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
