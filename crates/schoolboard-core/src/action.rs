//! Outcome types for the action layer.
//!
//! Every create/update/delete returns `Result<T, ActionError>`. The error is
//! tagged with a [`FailureKind`] so callers (and tests) can tell a full class
//! apart from a missing row or an identity-provider outage. Diagnostic detail
//! is logged when the error is rendered and never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Coarse failure category reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ValidationFailed,
    CapacityExceeded,
    NotFound,
    UpstreamError,
    DatabaseError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::NotFound => "not_found",
            Self::UpstreamError => "upstream_error",
            Self::DatabaseError => "database_error",
        }
    }
}

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("class {class_id} is full ({capacity} students)")]
    CapacityExceeded { class_id: i32, capacity: i32 },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("identity provider error: {0}")]
    Upstream(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ActionError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::ValidationFailed,
            Self::CapacityExceeded { .. } => FailureKind::CapacityExceeded,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Upstream(_) => FailureKind::UpstreamError,
            Self::Database(_) => FailureKind::DatabaseError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CapacityExceeded { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Database(err) if is_constraint_violation(err) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Field-level detail, only populated for validation failures.
    pub fn fields(&self) -> &[FieldError] {
        match self {
            Self::Validation(fields) => fields,
            _ => &[],
        }
    }
}

/// Unique, foreign-key and check violations are caller mistakes, not outages.
pub fn is_constraint_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
        }
        _ => false,
    }
}

impl From<ValidationErrors> for ActionError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        Self::Validation(fields)
    }
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: bool,
    kind: FailureKind,
    #[serde(skip_serializing_if = "<[FieldError]>::is_empty")]
    fields: &'a [FieldError],
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Database(_) | Self::Upstream(_) if status.is_server_error() => {
                tracing::error!(kind = ?self.kind(), error = %self, "Action failed");
            }
            _ => {
                tracing::warn!(kind = ?self.kind(), error = %self, "Action rejected");
            }
        }

        let body = FailureBody {
            success: false,
            error: true,
            kind: self.kind(),
            fields: self.fields(),
        };

        (status, Json(body)).into_response()
    }
}

/// Envelope for successful actions.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse<T> {
    pub success: bool,
    pub error: bool,
    pub data: T,
}

impl<T> ActionResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: false,
            data,
        }
    }
}
