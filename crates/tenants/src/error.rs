//! Unified error handling with Sentry integration.
//!
//! Every tenant handler returns `Result<Response, ApiError>`. The mapping to
//! HTTP is fixed by the endpoint's public contract:
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `Rejected` | 304 | none |
//! | `SessionExpired` | 401 | fixed message |
//! | `NotOwner` | 403 | none |
//! | `Store` | store's status | store's status text |
//! | `UpdateFailed` | 400 | fixed message |
//!
//! 304 is kept as the catch-all rejection for compatibility with existing
//! clients of this endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::session::SessionError;
use crate::store::StoreError;

/// Body sent when a session token cannot be verified.
pub const SESSION_EXPIRED_MESSAGE: &str = "La sesión ha expirado, por favor inicia sesión de nuevo";

/// Body sent when a verified owner's update fails in the store.
pub const UPDATE_FAILED_MESSAGE: &str = "Hubo un error al actualizar la tienda";

/// Application-level error type for the tenant endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input, a wrong shared secret, or an unsupported
    /// method. Deliberately carries no detail.
    #[error("request rejected")]
    Rejected,

    /// Session token missing, invalid or expired.
    #[error("session verification failed: {0}")]
    SessionExpired(#[source] SessionError),

    /// Verified caller does not own the tenant.
    #[error("caller does not own the tenant")]
    NotOwner,

    /// Store failure forwarded verbatim.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Store failure while updating, flattened to a fixed message.
    #[error("tenant update failed: {0}")]
    UpdateFailed(#[source] StoreError),
}

impl ApiError {
    fn is_reportable(&self) -> bool {
        match self {
            Self::Store(err) | Self::UpdateFailed(err) => err.is_server_error(),
            Self::SessionExpired(err) => err.is_infrastructure(),
            Self::Rejected | Self::NotOwner => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_reportable() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request refused");
        }

        match self {
            Self::Rejected => StatusCode::NOT_MODIFIED.into_response(),
            Self::SessionExpired(_) => {
                (StatusCode::UNAUTHORIZED, SESSION_EXPIRED_MESSAGE).into_response()
            }
            Self::NotOwner => StatusCode::FORBIDDEN.into_response(),
            Self::Store(err) => (err.status, err.status_text).into_response(),
            Self::UpdateFailed(_) => (StatusCode::BAD_REQUEST, UPDATE_FAILED_MESSAGE).into_response(),
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Set the Sentry user context from a verified account.
pub fn set_sentry_user(user_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn parts(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_rejected_is_empty_304() {
        assert_eq!(parts(ApiError::Rejected).await, (StatusCode::NOT_MODIFIED, String::new()));
    }

    #[tokio::test]
    async fn test_session_expired_message() {
        let (status, body) = parts(ApiError::SessionExpired(SessionError::Invalid)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, SESSION_EXPIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_not_owner_is_empty_403() {
        assert_eq!(parts(ApiError::NotOwner).await, (StatusCode::FORBIDDEN, String::new()));
    }

    #[tokio::test]
    async fn test_store_error_forwarded_verbatim() {
        let err = StoreError::new(StatusCode::CONFLICT, "Conflict");
        assert_eq!(parts(ApiError::Store(err)).await, (StatusCode::CONFLICT, "Conflict".to_owned()));
    }

    #[tokio::test]
    async fn test_update_failure_flattened() {
        let (status, body) = parts(ApiError::UpdateFailed(StoreError::internal())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, UPDATE_FAILED_MESSAGE);
    }
}
