use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use schoolboard_core::serde::{deserialize_datetime, deserialize_number};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: i32,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub lesson_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignmentForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub due_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Lesson is required"))]
    pub lesson_id: i32,
}
