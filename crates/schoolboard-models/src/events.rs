use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{
    deserialize_datetime, deserialize_optional_number, deserialize_optional_string,
};

/// A calendar event; `class_id = None` means school-wide.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub class_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EventForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub end_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    #[validate(range(min = 1, message = "Invalid class"))]
    pub class_id: Option<i32>,
}

/// Class scoping for events and announcements.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassScopeFilter {
    /// Items for this class plus school-wide items
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub class_id: Option<i32>,
    /// Items for classes this student attends plus school-wide items
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub student_id: Option<String>,
}
