use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use schoolboard_core::serde::deserialize_optional_string;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Parent {
    pub id: String,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParentDetail {
    #[serde(flatten)]
    pub parent: Parent,
    pub student_ids: Vec<String>,
}

/// Parents have no photo and a mandatory phone number.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ParentForm {
    #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters long"))]
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "First name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub surname: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}
