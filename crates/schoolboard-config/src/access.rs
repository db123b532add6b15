use std::env;

use schoolboard_core::Role;

/// Settings for the role-based redirect middleware.
#[derive(Clone, Debug)]
pub struct AccessConfig {
    /// Role assumed when a session carries no (or an unknown) role claim.
    pub fallback_role: Role,
    pub sign_in_path: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            fallback_role: Role::Admin,
            sign_in_path: "/sign-in".to_string(),
        }
    }
}

impl AccessConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let fallback_role = match lookup("ACCESS_FALLBACK_ROLE") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Invalid ACCESS_FALLBACK_ROLE, using admin");
                defaults.fallback_role
            }),
            None => defaults.fallback_role,
        };

        Self {
            fallback_role,
            sign_in_path: lookup("ACCESS_SIGN_IN_PATH").unwrap_or(defaults.sign_in_path),
        }
    }
}
