use std::env;

/// Session token settings.
///
/// Sessions are issued by the identity provider and signed with a shared
/// HS256 secret; `session_expiry` only applies to tokens minted locally
/// (CLI and tests).
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub session_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            session_expiry: env::var("JWT_SESSION_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        }
    }
}
