//! Session claim structures.
//!
//! Sessions are minted by the identity provider. The role lives in the
//! provider's public metadata and is surfaced as `metadata.role`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use schoolboard_core::Role;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Claims of a verified session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionClaims {
    /// Identity-provider user id (subject claim)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SessionMetadata>,
    /// Expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl SessionClaims {
    /// The role claim, if present and recognised.
    pub fn role(&self) -> Option<Role> {
        self.metadata
            .as_ref()
            .and_then(|m| m.role.as_deref())
            .and_then(|raw| raw.parse().ok())
    }

    /// The role claim, or `fallback` when it is missing or unrecognised.
    pub fn role_or(&self, fallback: Role) -> Role {
        self.role().unwrap_or(fallback)
    }
}
