use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{
    deserialize_number, deserialize_optional_number, deserialize_optional_string,
};

/// A score against an exam or an assignment.
///
/// Nothing enforces that exactly one of `exam_id` / `assignment_id` is set.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ExamResult {
    pub id: i32,
    pub score: i32,
    pub exam_id: Option<i32>,
    pub assignment_id: Option<i32>,
    pub student_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResultForm {
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 0, max = 100, message = "Score must be between 0 and 100"))]
    pub score: i32,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    #[validate(range(min = 1, message = "Invalid exam"))]
    pub exam_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    #[validate(range(min = 1, message = "Invalid assignment"))]
    pub assignment_id: Option<i32>,
    #[validate(length(min = 1, message = "Student is required"))]
    pub student_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResultFilter {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub exam_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub assignment_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn both_links_are_allowed() {
        let form: ResultForm = serde_json::from_value(json!({
            "score": "90",
            "exam_id": "1",
            "assignment_id": "2",
            "student_id": "student1"
        }))
        .unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn score_out_of_range() {
        let form: ResultForm = serde_json::from_value(json!({
            "score": 101,
            "exam_id": "",
            "student_id": "student1"
        }))
        .unwrap();
        assert!(form.exam_id.is_none());
        assert!(form.validate().unwrap_err().field_errors().contains_key("score"));
    }
}
