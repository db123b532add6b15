use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Teacher, TeacherDetail, TeacherFilter, TeacherForm};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/teachers",
    request_body(content = TeacherForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Teacher created with an identity account", body = ActionResponse<TeacherDetail>),
        (status = 403, description = "Only admins may create teachers"),
        (status = 409, description = "Username, email or phone already taken"),
        (status = 422, description = "Validation failed"),
        (status = 502, description = "Identity provider unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, form))]
pub async fn create_teacher(
    State(state): State<AppState>,
    FormInput(form): FormInput<TeacherForm>,
) -> Result<Json<ActionResponse<TeacherDetail>>, ActionError> {
    let result = TeacherService::create_teacher(&state.db, &state.identity, form).await;
    track_action("teacher", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/teachers",
    params(ListParams, TeacherFilter),
    responses(
        (status = 200, description = "Page of teachers", body = Paginated<Teacher>)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<TeacherFilter>,
) -> Result<Json<Paginated<Teacher>>, ActionError> {
    let page = TeacherService::list_teachers(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/teachers/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    responses(
        (status = 200, description = "Teacher with subject and supervised class ids", body = TeacherDetail),
        (status = 404, description = "Teacher not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeacherDetail>, ActionError> {
    let teacher = TeacherService::get_teacher(&state.db, &id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/list/teachers/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    request_body(content = TeacherForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Teacher updated; subjects and classes replaced", body = ActionResponse<TeacherDetail>),
        (status = 404, description = "Teacher not found"),
        (status = 422, description = "Validation failed"),
        (status = 502, description = "Identity provider unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, form))]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormInput(form): FormInput<TeacherForm>,
) -> Result<Json<ActionResponse<TeacherDetail>>, ActionError> {
    let result = TeacherService::update_teacher(&state.db, &state.identity, &id, form).await;
    track_action("teacher", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/teachers/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    responses(
        (status = 200, description = "Teacher and identity account deleted", body = ActionResponse<String>),
        (status = 404, description = "Teacher not found"),
        (status = 409, description = "Teacher still has lessons or supervised classes")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse<String>>, ActionError> {
    let result = TeacherService::delete_teacher(&state.db, &state.identity, &id).await;
    track_action("teacher", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
