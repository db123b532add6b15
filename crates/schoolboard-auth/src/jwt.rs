//! Session token creation and verification.
//!
//! Production sessions are issued by the identity provider; this service
//! only verifies them. [`create_session_token`] exists for the CLI and for
//! tests that need a signed session.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use schoolboard_config::JwtConfig;
use schoolboard_core::{AppError, Role};

use crate::claims::{SessionClaims, SessionMetadata};

/// Signs a session for `user_id` carrying `role` in its metadata.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_session_token(
    user_id: &str,
    role: Option<Role>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let issued_at = Utc::now().timestamp();
    let now = issued_at as usize;
    let exp = (issued_at + jwt_config.session_expiry).max(0) as usize;

    let claims = SessionClaims {
        sub: user_id.to_string(),
        metadata: role.map(|role| SessionMetadata {
            role: Some(role.as_str().to_string()),
        }),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create session token: {}", e)))
}

/// Verifies signature and expiry and returns the session claims.
///
/// # Errors
///
/// Returns an unauthorized error for malformed, forged or expired tokens.
pub fn verify_session_token(token: &str, jwt_config: &JwtConfig) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired session"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            session_expiry: 3600,
        }
    }

    #[test]
    fn round_trips_role() {
        let config = get_test_jwt_config();
        let token = create_session_token("user_42", Some(Role::Parent), &config).unwrap();

        let claims = verify_session_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user_42");
        assert_eq!(claims.role(), Some(Role::Parent));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_without_role_has_no_metadata() {
        let config = get_test_jwt_config();
        let token = create_session_token("user_7", None, &config).unwrap();
        let claims = verify_session_token(&token, &config).unwrap();
        assert!(claims.metadata.is_none());
    }

    #[test]
    fn rejects_garbage() {
        let err = verify_session_token("not.a.jwt", &get_test_jwt_config()).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = create_session_token("user_1", Some(Role::Admin), &get_test_jwt_config()).unwrap();
        let other = JwtConfig {
            secret: "a-completely-different-secret-value".to_string(),
            session_expiry: 3600,
        };
        assert!(verify_session_token(&token, &other).is_err());
    }

    #[test]
    fn rejects_expired() {
        let config = JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            session_expiry: -7200,
        };
        let token = create_session_token("user_1", None, &config).unwrap();
        assert!(verify_session_token(&token, &config).is_err());
    }
}
