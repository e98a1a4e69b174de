//! Tenant persistence boundary.
//!
//! Handlers talk to a [`TenantStore`]; the production implementation is
//! [`PgTenantStore`]. Every failure is reported as a [`StoreError`], an HTTP
//! status plus its status text, which the fetch and create handlers forward
//! to the caller unchanged.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum::http::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

use storefront_tenants_core::{Email, Slug, TenantId, new_account_id};

use crate::db::{RepositoryError, TenantRepository};
use crate::models::{ServerTenant, TenantDraft, TenantPatch};

/// Minimum password length for owning accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A store failure, shaped like an HTTP response line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {status_text}")]
pub struct StoreError {
    pub status: StatusCode,
    pub status_text: String,
}

impl StoreError {
    /// Build an error from a status and explicit text.
    #[must_use]
    pub fn new(status: StatusCode, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
        }
    }

    /// Build an error whose text is the status's canonical reason.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or("Unknown"))
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self::from_status(StatusCode::NOT_FOUND)
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::from_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Whether this failure is the store's fault rather than the caller's.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::not_found(),
            RepositoryError::Conflict(_) => Self::from_status(StatusCode::CONFLICT),
            RepositoryError::Database(e) => {
                tracing::error!(error = %e, "tenant store database error");
                Self::internal()
            }
            RepositoryError::DataCorruption(msg) => {
                tracing::error!(error = %msg, "tenant store data corruption");
                Self::internal()
            }
        }
    }
}

/// Persistence operations the tenant endpoint depends on.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Look up a tenant by slug.
    async fn fetch(&self, slug: &Slug) -> Result<ServerTenant, StoreError>;

    /// Provision an owning account and its tenant.
    async fn create(
        &self,
        email: &Email,
        password: &SecretString,
        tenant: TenantDraft,
    ) -> Result<ServerTenant, StoreError>;

    /// Apply a patch to an existing tenant.
    async fn update(&self, id: TenantId, patch: TenantPatch) -> Result<ServerTenant, StoreError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// `PostgreSQL`-backed tenant store.
#[derive(Clone)]
pub struct PgTenantStore {
    pool: PgPool,
}

impl PgTenantStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn tenants(&self) -> TenantRepository<'_> {
        TenantRepository::new(&self.pool)
    }
}

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn fetch(&self, slug: &Slug) -> Result<ServerTenant, StoreError> {
        self.tenants()
            .get_by_slug(slug)
            .await?
            .ok_or_else(StoreError::not_found)
    }

    async fn create(
        &self,
        email: &Email,
        password: &SecretString,
        tenant: TenantDraft,
    ) -> Result<ServerTenant, StoreError> {
        validate_password(password.expose_secret())?;
        let password_hash = hash_password(password.expose_secret())?;

        let (owner, _) = new_account_id();
        let created = self
            .tenants()
            .create_with_owner(owner, email, &password_hash, &tenant)
            .await?;

        tracing::info!(tenant_id = %created.id, slug = %created.slug, "tenant provisioned");
        Ok(created)
    }

    async fn update(&self, id: TenantId, patch: TenantPatch) -> Result<ServerTenant, StoreError> {
        Ok(self.tenants().update(id, &patch).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(self.tenants().ping().await?)
    }
}

/// Reject passwords the account service would not accept.
fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(StoreError::new(
            StatusCode::BAD_REQUEST,
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    Ok(())
}

/// Hash a password with Argon2id and a random salt.
fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            StoreError::internal()
        })
}
