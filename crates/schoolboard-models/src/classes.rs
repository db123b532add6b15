use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{
    deserialize_number, deserialize_optional_number, deserialize_optional_string,
};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Class {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub grade_id: i32,
    pub supervisor_id: Option<String>,
}

/// A class row with its current enrolment.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClassWithStats {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub grade_id: i32,
    pub supervisor_id: Option<String>,
    pub student_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ClassForm {
    #[validate(length(min = 1, message = "Class name is required"))]
    pub name: String,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
    #[serde(deserialize_with = "deserialize_number")]
    #[validate(range(min = 1, message = "Grade is required"))]
    pub grade_id: i32,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub supervisor_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassFilter {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub supervisor_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub grade_id: Option<i32>,
}
