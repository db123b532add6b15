use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolboard_core::serde::{deserialize_optional_string, deserialize_string_list};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubjectDetail {
    #[serde(flatten)]
    pub subject: Subject,
    pub teacher_ids: Vec<String>,
}

/// `teachers` replaces the subject's full teacher set on update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubjectForm {
    #[validate(length(min = 1, message = "Subject name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub teachers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubjectFilter {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub teacher_id: Option<String>,
}
