//! Tenant endpoint handlers.
//!
//! Inputs arrive loosely typed (every field optional) and are checked for
//! presence before any store or session call. Each handler runs strictly in
//! order: validate, authenticate, authorize, mutate, respond.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use storefront_tenants_core::{Email, Slug, TenantId};

use crate::error::{ApiError, Result, set_sentry_user};
use crate::schema;
use crate::session::{SessionError, bearer_token};
use crate::state::AppState;
use crate::store::StoreError;

/// Query string accepted by `GET`.
#[derive(Debug, Default, Deserialize)]
pub struct FetchQuery {
    pub secret: Option<String>,
}

/// Body accepted by `POST`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub secret: Option<String>,
}

/// Body accepted by `PATCH`. The tenant may be in client or server shape.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
    pub tenant: Option<Value>,
}

/// Validated `POST` input.
struct CreateInput {
    slug: String,
    email: String,
    password: SecretString,
    secret: String,
}

impl CreateInput {
    fn from_parts(slug: String, body: CreateBody) -> Option<Self> {
        Some(Self {
            slug: present(Some(slug))?,
            email: present(body.email)?,
            password: SecretString::from(present(body.password)?),
            secret: present(body.secret)?,
        })
    }
}

/// Keep a value only if it is present and non-empty.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Split a submitted tenant into its id and the remaining fields.
///
/// Requires an object with a UUID `id` and a non-empty string `slug`.
fn split_tenant(tenant: &Value) -> Option<(TenantId, Map<String, Value>)> {
    let mut fields = tenant.as_object()?.clone();

    let slug_present = fields
        .get("slug")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty());
    if !slug_present {
        return None;
    }

    let id = fields.remove("id")?.as_str()?.parse::<TenantId>().ok()?;
    Some((id, fields))
}

/// `GET /api/tenants/{slug}?secret=...`
///
/// Returns the client view of the tenant.
pub async fn fetch(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<FetchQuery>, QueryRejection>,
) -> Result<Response> {
    let secret = query.ok().and_then(|Query(q)| present(q.secret));
    if !secret.is_some_and(|s| state.secret_matches(&s)) {
        return Err(ApiError::Rejected);
    }

    let Ok(Path(raw_slug)) = path else {
        return Err(ApiError::Rejected);
    };
    // A slug that fails validation can never have been stored.
    let slug = Slug::parse(&raw_slug).map_err(|_| StoreError::not_found())?;

    let tenant = state.store().fetch(&slug).await?;
    tracing::debug!(slug = %slug, tenant_id = %tenant.id, "tenant fetched");

    Ok(Json(schema::client_fetch(tenant)).into_response())
}

/// `POST /api/tenants/{slug}`
///
/// Provisions an owning account and a tenant on the commercial trial.
pub async fn create(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<CreateBody>, JsonRejection>,
) -> Result<Response> {
    let (Ok(Path(slug)), Ok(Json(body))) = (path, body) else {
        return Err(ApiError::Rejected);
    };
    let input = CreateInput::from_parts(slug, body).ok_or(ApiError::Rejected)?;

    if !state.secret_matches(&input.secret) {
        return Err(ApiError::Rejected);
    }

    let email = Email::parse(&input.email).map_err(|_| ApiError::Rejected)?;

    let now = state.clock().now();
    let draft = schema::server_create(&input.slug, now, state.trial_days()).map_err(|e| {
        tracing::debug!(error = %e, "tenant draft rejected");
        ApiError::Rejected
    })?;

    // No id exists until the store assigns one.
    let candidate = draft.clone().into_server(TenantId::nil(), email.clone());
    schema::server_fetch(&candidate).map_err(|e| {
        tracing::debug!(error = %e, "tenant draft failed record validation");
        ApiError::Rejected
    })?;

    let created = state.store().create(&email, &input.password, draft).await?;
    tracing::info!(slug = %created.slug, tenant_id = %created.id, "tenant created");

    Ok(Json(json!({ "success": true })).into_response())
}

/// `PATCH /api/tenants/{slug}`
///
/// Applies an owner's changes. Responds with the tenant exactly as submitted.
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Response> {
    let Ok(Json(body)) = body else {
        return Err(ApiError::Rejected);
    };
    let tenant = body.tenant.ok_or(ApiError::Rejected)?;
    let (id, fields) = split_tenant(&tenant).ok_or(ApiError::Rejected)?;

    let token = bearer_token(&headers)
        .ok_or(ApiError::SessionExpired(SessionError::MissingToken))?;
    let user = state
        .sessions()
        .verify(token)
        .await
        .map_err(ApiError::SessionExpired)?;

    if !id.is_owned_by(user) {
        tracing::warn!(tenant_id = %id, user_id = %user, "tenant update by non-owner");
        return Err(ApiError::NotOwner);
    }
    set_sentry_user(&user);

    let patch = schema::server_update(&fields).map_err(|e| {
        tracing::debug!(error = %e, "tenant patch rejected");
        ApiError::Rejected
    })?;

    state
        .store()
        .update(id, patch)
        .await
        .map_err(ApiError::UpdateFailed)?;
    tracing::info!(tenant_id = %id, "tenant updated");

    Ok(Json(tenant).into_response())
}

/// Any other method on a tenant route.
pub async fn unsupported() -> ApiError {
    ApiError::Rejected
}
