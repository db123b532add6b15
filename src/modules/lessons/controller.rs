use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Lesson, LessonFilter, LessonForm};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::lessons::service::LessonService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/lessons",
    request_body(content = LessonForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Lesson created", body = ActionResponse<Lesson>),
        (status = 403, description = "Caller may not modify lessons"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Unknown subject, class or teacher")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, form))]
pub async fn create_lesson(
    State(state): State<AppState>,
    FormInput(form): FormInput<LessonForm>,
) -> Result<Json<ActionResponse<Lesson>>, ActionError> {
    let result = LessonService::create_lesson(&state.db, form).await;
    track_action("lesson", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/lessons",
    params(ListParams, LessonFilter),
    responses(
        (status = 200, description = "Page of lessons", body = Paginated<Lesson>)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn list_lessons(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<LessonFilter>,
) -> Result<Json<Paginated<Lesson>>, ActionError> {
    let page = LessonService::list_lessons(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/lessons/{id}",
    params(("id" = i32, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Lesson", body = Lesson),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Lesson>, ActionError> {
    let lesson = LessonService::get_lesson(&state.db, id).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    put,
    path = "/list/lessons/{id}",
    params(("id" = i32, Path, description = "Lesson id")),
    request_body(content = LessonForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Lesson updated", body = ActionResponse<Lesson>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, form))]
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<LessonForm>,
) -> Result<Json<ActionResponse<Lesson>>, ActionError> {
    let result = LessonService::update_lesson(&state.db, id, form).await;
    track_action("lesson", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/lessons/{id}",
    params(("id" = i32, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Lesson deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Lesson still has exams, assignments or attendance")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = LessonService::delete_lesson(&state.db, id).await;
    track_action("lesson", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
