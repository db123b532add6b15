use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{
    deserialize_datetime, deserialize_number, deserialize_optional_number,
    deserialize_optional_string,
};

use crate::enums::{BloodType, UserSex};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: String,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    pub img: Option<String>,
    pub blood_type: BloodType,
    pub sex: UserSex,
    pub birthday: DateTime<Utc>,
    pub parent_id: String,
    pub class_id: i32,
    pub grade_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Create/update input for a student.
///
/// The target class must have room at creation time; moving an existing
/// student between classes is not capacity checked.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StudentForm {
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
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub img: Option<String>,
    pub blood_type: BloodType,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub birthday: DateTime<Utc>,
    pub sex: UserSex,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Grade is required"))]
    pub grade_id: i32,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Class is required"))]
    pub class_id: i32,
    #[validate(length(min = 1, message = "Parent id is required"))]
    pub parent_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilter {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub class_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub grade_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub parent_id: Option<String>,
    /// Only students in a class this teacher has lessons with
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub teacher_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_foreign_keys() {
        let form: StudentForm = serde_json::from_value(json!({
            "username": "student1",
            "password": "password123",
            "name": "Ada",
            "surname": "Lovelace",
            "address": "2 School Rd",
            "blood_type": "A-",
            "birthday": "2012-09-01",
            "sex": "FEMALE",
            "grade_id": "3",
            "class_id": "3",
            "parent_id": "parent_9"
        }))
        .unwrap();

        assert!(form.validate().is_ok());
        assert_eq!(form.grade_id, 3);
        assert_eq!(form.class_id, 3);
        assert_eq!(form.email, None);
    }

    #[test]
    fn zero_class_is_rejected() {
        let form: StudentForm = serde_json::from_value(json!({
            "username": "student1",
            "name": "Ada",
            "surname": "Lovelace",
            "address": "2 School Rd",
            "blood_type": "A-",
            "birthday": "2012-09-01",
            "sex": "FEMALE",
            "grade_id": 3,
            "class_id": 0,
            "parent_id": ""
        }))
        .unwrap();

        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("class_id"));
        assert!(errors.field_errors().contains_key("parent_id"));
    }
}
