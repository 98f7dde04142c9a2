//! Caller identity from platform authentication headers.
//!
//! The hosting front door authenticates users and injects their principal id
//! and name as request headers. The service trusts those headers as-is; it
//! must only be reachable through that front door.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use rsalab_core::config::AuthConfig;
use rsalab_core::types::UserIdentity;
use rsalab_core::RsaLabError;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the caller's identity from request headers.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Option<UserIdentity>;
}

/// Reads the principal id/name headers injected by the hosting platform.
#[derive(Debug, Clone)]
pub struct PlatformHeaderResolver {
    user_id_header: String,
    user_email_header: String,
}

impl PlatformHeaderResolver {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            user_id_header: config.user_id_header.clone(),
            user_email_header: config.user_email_header.clone(),
        }
    }
}

impl IdentityResolver for PlatformHeaderResolver {
    fn resolve(&self, headers: &HeaderMap) -> Option<UserIdentity> {
        let user_id = header_value(headers, &self.user_id_header)?;
        // email falls back to the id when the platform omits it
        let email = header_value(headers, &self.user_email_header).unwrap_or_else(|| user_id.clone());
        Some(UserIdentity { user_id, email })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Extractor for handlers that require an authenticated caller.
pub struct AuthUser(pub UserIdentity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .resolver
            .resolve(&parts.headers)
            .map(AuthUser)
            .ok_or_else(|| ApiError(RsaLabError::Unauthorized("Authentication required".into())))
    }
}
