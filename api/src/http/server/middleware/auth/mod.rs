use axum::{extract::FromRequestParts, http::request::Parts};
use groupsync_core::domain::identity::{entities::Session, ports::AuthService};

use crate::http::server::{ApiError, AppState, SyncService};

/// The caller's session, resolved from the `Authorization: Bearer` header.
pub struct AuthSession(pub Session);

impl<S: SyncService> FromRequestParts<AppState<S>> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        tracing::debug!("Authentication middleware: checking request to {}", parts.uri);

        let auth_value = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or_else(|| {
                tracing::warn!("Authentication failed: Authorization header missing");
                ApiError::Unauthorized("missing bearer token".to_string())
            })?
            .to_str()
            .map_err(|e| {
                tracing::warn!("Authentication failed: Authorization header is not valid UTF-8: {}", e);
                ApiError::Unauthorized("malformed authorization header".to_string())
            })?;

        let token = auth_value.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::warn!("Authentication failed: Authorization header doesn't start with 'Bearer '");
            ApiError::Unauthorized("missing bearer token".to_string())
        })?;

        let session = state.service.resolve_session(token).await.map_err(|e| {
            tracing::warn!(error = %e, "Authentication failed: token rejected");
            ApiError::from(e)
        })?;

        tracing::debug!(user_id = %session.user_id, "Authentication successful");
        Ok(Self(session))
    }
}
