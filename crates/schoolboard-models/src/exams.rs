use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{
    deserialize_datetime, deserialize_number, deserialize_optional_number,
    deserialize_optional_string,
};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Exam {
    pub id: i32,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub lesson_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ExamForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub end_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Lesson is required"))]
    pub lesson_id: i32,
}

/// Filters shared by exam and assignment lists, resolved through the lesson.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LessonWorkFilter {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub lesson_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub class_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub teacher_id: Option<String>,
}
