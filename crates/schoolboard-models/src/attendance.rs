use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{
    deserialize_datetime, deserialize_flag, deserialize_number, deserialize_optional_number,
    deserialize_optional_string,
};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Attendance {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub present: bool,
    pub student_id: String,
    pub lesson_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AttendanceForm {
    #[serde(deserialize_with = "deserialize_datetime")]
    pub date: DateTime<Utc>,
    /// Checkbox value; missing means absent.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub present: bool,
    #[validate(length(min = 1, message = "Student is required"))]
    pub student_id: String,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Lesson is required"))]
    pub lesson_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub lesson_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unchecked_box_is_absent() {
        let form: AttendanceForm = serde_json::from_value(json!({
            "date": "2024-10-01",
            "student_id": "student3",
            "lesson_id": "4"
        }))
        .unwrap();
        assert!(!form.present);
    }

    #[test]
    fn checked_box_is_present() {
        let form: AttendanceForm = serde_json::from_value(json!({
            "date": "2024-10-01",
            "present": "on",
            "student_id": "student3",
            "lesson_id": 4
        }))
        .unwrap();
        assert!(form.present);
    }
}
