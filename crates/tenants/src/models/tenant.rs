//! Tenant domain types.
//!
//! A tenant has two wire views: [`ClientTenant`] is safe to hand to any caller
//! holding the shared secret, [`ServerTenant`] is the full record including
//! internal bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_tenants_core::{Email, Slug, TenantId, Tier};

/// Full tenant record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTenant {
    /// Store-assigned identifier, shared with the owning account.
    pub id: TenantId,
    /// Unique, immutable URL identifier.
    pub slug: Slug,
    /// Display name of the storefront.
    pub name: String,
    /// Current billing tier.
    pub tier: Tier,
    /// When the current tier lapses.
    pub tier_until: DateTime<Utc>,
    /// When the tenant was provisioned.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Email of the owning account.
    pub owner_email: Email,
}

/// Externally visible subset of a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTenant {
    pub id: TenantId,
    pub slug: Slug,
    pub name: String,
    pub tier: Tier,
    pub tier_until: DateTime<Utc>,
}

/// A tenant that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantDraft {
    pub slug: Slug,
    pub name: String,
    pub tier: Tier,
    pub tier_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields an owner may change on an existing tenant.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantPatch {
    pub name: Option<String>,
    pub tier: Option<Tier>,
    pub tier_until: Option<DateTime<Utc>>,
}

impl TenantDraft {
    /// Attach an identifier and owner, producing the full record shape.
    #[must_use]
    pub fn into_server(self, id: TenantId, owner_email: Email) -> ServerTenant {
        ServerTenant {
            id,
            slug: self.slug,
            name: self.name,
            tier: self.tier,
            tier_until: self.tier_until,
            created_at: self.created_at,
            updated_at: self.created_at,
            owner_email,
        }
    }
}
