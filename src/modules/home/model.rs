use schoolboard_core::Role;
use schoolboard_identity::Account;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Row counts shown on the admin home page.
#[derive(Debug, Clone, Default, Serialize, FromRow, ToSchema)]
pub struct SchoolCounts {
    pub admins: i64,
    pub teachers: i64,
    pub students: i64,
    pub parents: i64,
    pub classes: i64,
    pub subjects: i64,
    pub lessons: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomeResponse {
    pub role: Role,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<SchoolCounts>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub role: Role,
    pub account: Account,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignInResponse {
    pub sign_in_url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub identity_backend: &'static str,
}
