use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{
    deserialize_datetime, deserialize_number, deserialize_optional_number,
    deserialize_optional_string,
};

use crate::enums::Day;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: i32,
    pub name: String,
    pub day: Day,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub subject_id: i32,
    pub class_id: i32,
    pub teacher_id: String,
}

/// Lesson times are not checked for ordering or overlap.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LessonForm {
    #[validate(length(min = 1, message = "Lesson name is required"))]
    pub name: String,
    pub day: Day,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub end_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Subject is required"))]
    pub subject_id: i32,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Class is required"))]
    pub class_id: i32,
    #[validate(length(min = 1, message = "Teacher is required"))]
    pub teacher_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LessonFilter {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub class_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub teacher_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn end_before_start_is_accepted() {
        let form: LessonForm = serde_json::from_value(json!({
            "name": "Math",
            "day": "MONDAY",
            "start_time": "2024-09-02T10:00",
            "end_time": "2024-09-02T09:00",
            "subject_id": "1",
            "class_id": "1",
            "teacher_id": "teacher1"
        }))
        .unwrap();
        assert!(form.validate().is_ok());
        assert!(form.end_time < form.start_time);
    }

    #[test]
    fn unknown_day_fails_to_parse() {
        let parsed = serde_json::from_value::<LessonForm>(json!({
            "name": "Math",
            "day": "SUNDAY",
            "start_time": "2024-09-02T10:00",
            "end_time": "2024-09-02T11:00",
            "subject_id": 1,
            "class_id": 1,
            "teacher_id": "teacher1"
        }));
        assert!(parsed.is_err());
    }
}
