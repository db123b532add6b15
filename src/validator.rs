use axum::{
    Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;
use schoolboard_core::{ActionError, FieldError};

/// Request body accepted either as `application/json` or as an HTML form
/// (`application/x-www-form-urlencoded`, repeated keys for lists).
///
/// Only the shape is checked here. Constraint validation belongs to the
/// service so that actions called outside HTTP get the same checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormInput<T>(pub T);

impl<T, S> FromRequest<S> for FormInput<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ActionError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| json_error(&rejection.body_text()))?;
            Ok(FormInput(value))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| form_error(&rejection.to_string()))?;
            Ok(FormInput(value))
        } else {
            Err(ActionError::invalid(
                "body",
                "Expected a JSON or form-encoded body",
            ))
        }
    }
}

fn missing_field(message: &str) -> Option<ActionError> {
    message
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
        .map(|field| ActionError::invalid(field, format!("{} is required", field)))
}

/// JSON rejections read `<summary>: <path>: <detail> at line L column C`.
/// The path names the offending field; without one the error is reported
/// against `body`.
fn json_error(message: &str) -> ActionError {
    if let Some(err) = missing_field(message) {
        return err;
    }

    let detail = message
        .split_once(": ")
        .map(|(_, detail)| detail)
        .unwrap_or(message);
    let detail = match detail.rfind(" at line ") {
        Some(index) => &detail[..index],
        None => detail,
    };

    let (field, reason) = match detail.split_once(": ") {
        Some((path, reason)) if is_field_path(path) => (top_level_field(path), reason),
        _ => ("body", detail),
    };

    ActionError::Validation(vec![FieldError::new(field, reason)])
}

/// Form decoding reports no path.
fn form_error(message: &str) -> ActionError {
    missing_field(message).unwrap_or_else(|| ActionError::invalid("body", message))
}

fn is_field_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}

fn top_level_field(path: &str) -> &str {
    path.split(['.', '[']).next().unwrap_or(path)
}
