//! Casting between loosely-shaped tenant payloads and the typed views.
//!
//! Each cast is a pure function: it fills defaults, checks constraints and
//! either returns the typed value or every [`Violation`] it found.
//!
//! - [`client_fetch`] - full record to the externally visible view
//! - [`server_create`] - slug plus creation time to a new draft
//! - [`server_fetch`] - checks that a full record is well formed
//! - [`server_update`] - owner-submitted fields to a patch

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use storefront_tenants_core::{Slug, Tier};

use crate::clock::days_after;
use crate::models::{ClientTenant, ServerTenant, TenantDraft, TenantPatch};

/// Maximum length of a tenant display name.
pub const MAX_NAME_LENGTH: usize = 120;

/// Tier every new tenant starts on.
pub const INITIAL_TIER: Tier = Tier::Commercial;

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// What was wrong with it.
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All constraints a payload failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_violations(.0))]
pub struct Violations(pub Vec<Violation>);

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Project a full record onto the client view.
#[must_use]
pub fn client_fetch(tenant: ServerTenant) -> ClientTenant {
    ClientTenant {
        id: tenant.id,
        slug: tenant.slug,
        name: tenant.name,
        tier: tenant.tier,
        tier_until: tenant.tier_until,
    }
}

/// Build the draft for a tenant created at `now`.
///
/// The tenant starts on [`INITIAL_TIER`] until `trial_days` after `now`, and
/// its display name defaults to its slug.
///
/// # Errors
///
/// Returns `Violations` if `slug` is not a valid slug.
pub fn server_create(
    slug: &str,
    now: DateTime<Utc>,
    trial_days: u32,
) -> Result<TenantDraft, Violations> {
    let slug =
        Slug::parse(slug).map_err(|e| Violations(vec![Violation::new("slug", e.to_string())]))?;

    Ok(TenantDraft {
        name: slug.as_str().to_owned(),
        slug,
        tier: INITIAL_TIER,
        tier_until: days_after(now, trial_days),
        created_at: now,
    })
}

/// Check a full record against the stored-tenant constraints.
///
/// # Errors
///
/// Returns `Violations` listing every broken constraint.
pub fn server_fetch(tenant: &ServerTenant) -> Result<(), Violations> {
    let mut violations = Vec::new();

    if let Err(v) = check_name(&tenant.name) {
        violations.push(v);
    }
    if tenant.tier_until <= tenant.created_at {
        violations.push(Violation::new("tierUntil", "must be after createdAt"));
    }
    if tenant.updated_at < tenant.created_at {
        violations.push(Violation::new("updatedAt", "must not precede createdAt"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Violations(violations))
    }
}

/// Cast owner-submitted fields into a patch.
///
/// Only `name`, `tier` and `tierUntil` are writable; every other key
/// (including `slug`, which never changes) is dropped. `null` is treated as
/// absent.
///
/// # Errors
///
/// Returns `Violations` if a writable field has the wrong type or value.
pub fn server_update(fields: &Map<String, Value>) -> Result<TenantPatch, Violations> {
    let mut violations = Vec::new();
    let mut patch = TenantPatch::default();

    match field::<String>(fields, "name") {
        Ok(Some(name)) => match check_name(&name) {
            Ok(()) => patch.name = Some(name.trim().to_owned()),
            Err(v) => violations.push(v),
        },
        Ok(None) => {}
        Err(v) => violations.push(v),
    }

    match field::<Tier>(fields, "tier") {
        Ok(tier) => patch.tier = tier,
        Err(v) => violations.push(v),
    }

    match field::<DateTime<Utc>>(fields, "tierUntil") {
        Ok(until) => patch.tier_until = until,
        Err(v) => violations.push(v),
    }

    if violations.is_empty() {
        Ok(patch)
    } else {
        Err(Violations(violations))
    }
}

fn field<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<T>, Violation> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| Violation::new(key, e.to_string())),
    }
}

fn check_name(name: &str) -> Result<(), Violation> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Violation::new("name", "cannot be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(Violation::new(
            "name",
            format!("must be at most {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use serde_json::json;

    use storefront_tenants_core::{Email, TenantId};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    #[test]
    fn test_server_create_defaults() {
        let draft = server_create("tienda-sol", now(), 7).unwrap();

        assert_eq!(draft.slug.as_str(), "tienda-sol");
        assert_eq!(draft.name, "tienda-sol");
        assert_eq!(draft.tier, Tier::Commercial);
        assert_eq!(draft.created_at, now());
        assert_eq!(draft.tier_until - draft.created_at, TimeDelta::days(7));
    }

    #[test]
    fn test_server_create_rejects_bad_slug() {
        let err = server_create("Tienda Sol", now(), 7).unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert_eq!(err.0[0].field, "slug");
    }

    #[test]
    fn test_server_fetch_accepts_fresh_draft() {
        let draft = server_create("tienda-sol", now(), 7).unwrap();
        let tenant = draft.into_server(TenantId::nil(), Email::parse("a@b.c").unwrap());
        assert!(server_fetch(&tenant).is_ok());
    }

    #[test]
    fn test_server_fetch_collects_every_violation() {
        let draft = server_create("tienda-sol", now(), 7).unwrap();
        let mut tenant = draft.into_server(TenantId::nil(), Email::parse("a@b.c").unwrap());
        tenant.name = "   ".to_owned();
        tenant.tier_until = tenant.created_at;

        let err = server_fetch(&tenant).unwrap_err();
        let fields: Vec<_> = err.0.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["name", "tierUntil"]);
        assert!(err.to_string().contains("name: cannot be empty"));
    }

    #[test]
    fn test_client_fetch_drops_internal_fields() {
        let draft = server_create("tienda-sol", now(), 7).unwrap();
        let tenant = draft.into_server(TenantId::nil(), Email::parse("owner@sol.test").unwrap());

        let client = serde_json::to_value(client_fetch(tenant)).unwrap();
        let keys: Vec<_> = client.as_object().unwrap().keys().cloned().collect();

        assert!(keys.contains(&"tierUntil".to_owned()));
        assert!(!keys.contains(&"ownerEmail".to_owned()));
        assert!(!keys.contains(&"createdAt".to_owned()));
    }

    #[test]
    fn test_server_update_keeps_only_writable_fields() {
        let fields = as_map(json!({
            "slug": "renamed",
            "name": "  Tienda del Sol ",
            "tier": "enterprise",
            "ownerEmail": "someone@else.test",
            "createdAt": "2020-01-01T00:00:00Z",
        }));

        let patch = server_update(&fields).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Tienda del Sol"));
        assert_eq!(patch.tier, Some(Tier::Enterprise));
        assert_eq!(patch.tier_until, None);
    }

    #[test]
    fn test_server_update_null_is_absent() {
        let patch = server_update(&as_map(json!({ "name": null, "tierUntil": null }))).unwrap();
        assert_eq!(patch, TenantPatch::default());
    }

    #[test]
    fn test_server_update_reports_type_errors() {
        let fields = as_map(json!({ "name": 42, "tier": "gold", "tierUntil": "tomorrow" }));
        let err = server_update(&fields).unwrap_err();
        let fields: Vec<_> = err.0.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["name", "tier", "tierUntil"]);
    }
}
