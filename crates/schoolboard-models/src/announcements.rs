use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use schoolboard_core::serde::{deserialize_datetime, deserialize_optional_number};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub class_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AnnouncementForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    #[validate(range(min = 1, message = "Invalid class"))]
    pub class_id: Option<i32>,
}
