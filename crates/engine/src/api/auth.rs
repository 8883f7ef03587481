//! Bearer token authentication for HTTP routes.
//!
//! Clients send the key returned by `/login` in the `Authorization` header,
//! either as `Bearer <key>` or as the bare key.
//!
//! ```rust,ignore
//! async fn handler(user: AuthUser) -> String {
//!     format!("Hello, {}", user.username)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::http::ApiError;
use crate::app::App;

/// The account behind a valid token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    /// The presented token, kept so `/logout` can revoke it.
    pub token: String,
}

/// Pull the token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };
    (!token.is_empty()).then(|| token.to_string())
}

impl FromRequestParts<Arc<App>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        app: &Arc<App>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Not authorized".to_string()))?;

        let username = app
            .use_cases
            .auth
            .resolve(&token)
            .await
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser { username, token })
    }
}
