//! Teacher records, the teacher form and list filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{
    deserialize_datetime, deserialize_id_list, deserialize_optional_number,
    deserialize_optional_string,
};

use crate::enums::{BloodType, UserSex};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Teacher {
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
    pub created_at: DateTime<Utc>,
}

/// A teacher with the ids of the subjects they teach and the classes they
/// supervise.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeacherDetail {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub subject_ids: Vec<i32>,
    pub class_ids: Vec<i32>,
}

/// Create/update input for a teacher.
///
/// `subjects` and `classes` are full sets: on update they replace whatever
/// links existed before. `password` is required on create; on update an
/// empty password leaves the identity account's password unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TeacherForm {
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
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub subjects: Vec<i32>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub classes: Vec<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeacherFilter {
    /// Only teachers with a lesson in this class
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub class_id: Option<i32>,
    /// Only teachers of this subject
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub subject_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form_json() -> serde_json::Value {
        json!({
            "username": "mrsmith",
            "password": "supersecret",
            "name": "John",
            "surname": "Smith",
            "email": "",
            "phone": "",
            "address": "1 Main St",
            "img": "",
            "blood_type": "O+",
            "birthday": "1980-04-12",
            "sex": "MALE",
            "subjects": ["1", "2"]
        })
    }

    #[test]
    fn parses_form_shaped_input() {
        let form: TeacherForm = serde_json::from_value(form_json()).unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(form.email, None);
        assert_eq!(form.phone, None);
        assert_eq!(form.blood_type, BloodType::OPositive);
        assert_eq!(form.subjects, vec![1, 2]);
        assert!(form.classes.is_empty());
    }

    #[test]
    fn short_username_and_password_fail() {
        let mut value = form_json();
        value["username"] = json!("jo");
        value["password"] = json!("short");
        let form: TeacherForm = serde_json::from_value(value).unwrap();

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn empty_password_means_unchanged() {
        let mut value = form_json();
        value["password"] = json!("");
        let form: TeacherForm = serde_json::from_value(value).unwrap();
        assert!(form.password.is_none());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn bad_email_fails() {
        let mut value = form_json();
        value["email"] = json!("not-an-email");
        let form: TeacherForm = serde_json::from_value(value).unwrap();
        assert!(form.validate().unwrap_err().field_errors().contains_key("email"));
    }
}
