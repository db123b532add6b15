use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::CookieJar;
use schoolboard_auth::verify_session_token;
use schoolboard_config::JwtConfig;
use schoolboard_core::{AppError, Role};
use tracing::debug;

use crate::metrics::track_session_validation;
use crate::state::AppState;

/// Cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "__session";

/// The authenticated caller: provider user id plus resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
}

/// Bearer token first, then the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}

/// Verifies the request's session token, if any.
///
/// An invalid or expired token is treated like no token at all. A missing or
/// unrecognised role claim resolves to `fallback`.
pub fn resolve_session(headers: &HeaderMap, jwt_config: &JwtConfig, fallback: Role) -> Option<Session> {
    let token = session_token(headers)?;

    match verify_session_token(&token, jwt_config) {
        Ok(claims) => {
            track_session_validation(true);
            Some(Session {
                role: claims.role_or(fallback),
                user_id: claims.sub,
            })
        }
        Err(err) => {
            track_session_validation(false);
            debug!(error = %err.error, "Ignoring invalid session token");
            None
        }
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Set by the access middleware when it already verified the token
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        resolve_session(&parts.headers, &state.jwt_config, state.access_config.fallback_role)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}
