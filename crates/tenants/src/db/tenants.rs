//! Tenant repository for database operations.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use storefront_tenants_core::{Email, Slug, TenantId, Tier, UserId};

use super::RepositoryError;
use crate::models::{ServerTenant, TenantDraft, TenantPatch};

/// Row shape shared by every tenant query (tenant joined with its owner).
#[derive(Debug, sqlx::FromRow)]
struct TenantRow {
    id: Uuid,
    slug: String,
    name: String,
    tier: String,
    tier_until: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_email: String,
}

impl TryFrom<TenantRow> for ServerTenant {
    type Error = RepositoryError;

    fn try_from(row: TenantRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;
        let tier = row.tier.parse::<Tier>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid tier in database: {e}"))
        })?;
        let owner_email = Email::parse(&row.owner_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: TenantId::new(row.id),
            slug,
            name: row.name,
            tier,
            tier_until: row.tier_until,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner_email,
        })
    }
}

/// Map unique violations to `Conflict`, everything else to `Database`.
fn conflict_or_database(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

/// Repository for tenant database operations.
pub struct TenantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TenantRepository<'a> {
    /// Create a new tenant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a tenant by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Option<ServerTenant>, RepositoryError> {
        let row = sqlx::query_as::<_, TenantRow>(
            r"
            SELECT t.id, t.slug, t.name, t.tier, t.tier_until,
                   t.created_at, t.updated_at, a.email AS owner_email
            FROM tenants.tenant t
            JOIN tenants.account a ON a.id = t.id
            WHERE t.slug = $1
            ",
        )
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(ServerTenant::try_from).transpose()
    }

    /// Create an owning account and its tenant in one transaction.
    ///
    /// The tenant is stored under the account's id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_owner(
        &self,
        owner: UserId,
        email: &Email,
        password_hash: &str,
        draft: &TenantDraft,
    ) -> Result<ServerTenant, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO tenants.account (id, email, password_hash)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(owner)
        .bind(email.as_str())
        .bind(password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_or_database(e, "email"))?;

        let row = sqlx::query_as::<_, TenantRow>(
            r"
            INSERT INTO tenants.tenant (id, slug, name, tier, tier_until, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, slug, name, tier, tier_until, created_at, updated_at,
                      $7::text AS owner_email
            ",
        )
        .bind(owner)
        .bind(draft.slug.as_str())
        .bind(&draft.name)
        .bind(draft.tier.as_str())
        .bind(draft.tier_until)
        .bind(draft.created_at)
        .bind(email.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_or_database(e, "slug"))?;

        tx.commit().await?;

        ServerTenant::try_from(row)
    }

    /// Apply a patch to a tenant. Fields left as `None` keep their value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no tenant has this id.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: TenantId,
        patch: &TenantPatch,
    ) -> Result<ServerTenant, RepositoryError> {
        let row = sqlx::query_as::<_, TenantRow>(
            r"
            WITH updated AS (
                UPDATE tenants.tenant
                SET name = COALESCE($2, name),
                    tier = COALESCE($3, tier),
                    tier_until = COALESCE($4, tier_until),
                    updated_at = now()
                WHERE id = $1
                RETURNING id, slug, name, tier, tier_until, created_at, updated_at
            )
            SELECT u.id, u.slug, u.name, u.tier, u.tier_until,
                   u.created_at, u.updated_at, a.email AS owner_email
            FROM updated u
            JOIN tenants.account a ON a.id = u.id
            ",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.tier.map(|t| t.as_str()))
        .bind(patch.tier_until)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        ServerTenant::try_from(row)
    }

    /// Check that the database answers queries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the database is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self.pool).await?;
        Ok(())
    }
}
