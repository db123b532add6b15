use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Student, StudentFilter, StudentForm};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/students",
    request_body(content = StudentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Student created with an identity account", body = ActionResponse<Student>),
        (status = 403, description = "Caller may not modify students"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Class is full or username already taken"),
        (status = 502, description = "Identity provider unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, form))]
pub async fn create_student(
    State(state): State<AppState>,
    FormInput(form): FormInput<StudentForm>,
) -> Result<Json<ActionResponse<Student>>, ActionError> {
    let result = StudentService::create_student(&state.db, &state.identity, form).await;
    track_action("student", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/students",
    params(ListParams, StudentFilter),
    responses(
        (status = 200, description = "Page of students", body = Paginated<Student>)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<StudentFilter>,
) -> Result<Json<Paginated<Student>>, ActionError> {
    let page = StudentService::list_students(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/students/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    responses(
        (status = 200, description = "Student", body = Student),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ActionError> {
    let student = StudentService::get_student(&state.db, &id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/list/students/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    request_body(content = StudentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Student updated", body = ActionResponse<Student>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed"),
        (status = 502, description = "Identity provider unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, form))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormInput(form): FormInput<StudentForm>,
) -> Result<Json<ActionResponse<Student>>, ActionError> {
    let result = StudentService::update_student(&state.db, &state.identity, &id, form).await;
    track_action("student", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/students/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    responses(
        (status = 200, description = "Student and identity account deleted", body = ActionResponse<String>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Student still has results or attendance records")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse<String>>, ActionError> {
    let result = StudentService::delete_student(&state.db, &state.identity, &id).await;
    track_action("student", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
