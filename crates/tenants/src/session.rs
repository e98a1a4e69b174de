//! Session verification.
//!
//! Bearer tokens are exchanged for the id of the account they belong to.
//! The production [`HttpSessionVerifier`] asks the session service:
//!
//! ```text
//! POST {SESSION_VERIFIER_URL}/verify
//! Authorization: Bearer <token>
//!
//! 200 {"uid": "7b0c1f1e-2c39-4a8e-9d55-0b8f6f1d2a10"}
//! ```

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use storefront_tenants_core::UserId;

/// Errors that can occur while verifying a session token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No bearer token was supplied.
    #[error("missing bearer token")]
    MissingToken,

    /// The session service rejected the token (expired or forged).
    #[error("invalid or expired session")]
    Invalid,

    /// The session service answered with an unexpected status.
    #[error("session service returned {0}")]
    Upstream(StatusCode),

    /// The session service answered with a body we could not read.
    #[error("malformed session response: {0}")]
    Malformed(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SessionError {
    /// Whether this failure points at our infrastructure rather than the caller.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::Malformed(_) | Self::Http(_))
    }
}

/// Resolves session tokens to account ids.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verify `token` and return the id of the account it belongs to.
    async fn verify(&self, token: &str) -> Result<UserId, SessionError>;
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    uid: String,
}

/// Session verifier backed by the session service's HTTP API.
#[derive(Clone)]
pub struct HttpSessionVerifier {
    client: reqwest::Client,
    verify_url: Url,
}

impl HttpSessionVerifier {
    /// Create a verifier for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the verify endpoint cannot be derived.
    pub fn new(base_url: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: reqwest::Client::new(),
            verify_url: base_url.join("verify")?,
        })
    }
}

#[async_trait]
impl SessionVerifier for HttpSessionVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, SessionError> {
        let response = self
            .client
            .post(self.verify_url.clone())
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SessionError::Invalid);
        }
        if !status.is_success() {
            return Err(SessionError::Upstream(status));
        }

        let body: VerifyResponse = response.json().await?;
        body.uid
            .parse::<UserId>()
            .map_err(|e| SessionError::Malformed(format!("uid is not a uuid: {e}")))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
