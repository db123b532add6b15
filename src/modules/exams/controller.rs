use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Exam, ExamForm, LessonWorkFilter};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::exams::service::ExamService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/exams",
    request_body(content = ExamForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Exam created", body = ActionResponse<Exam>),
        (status = 403, description = "Caller may not modify exams"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Unknown lesson")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state, form))]
pub async fn create_exam(
    State(state): State<AppState>,
    FormInput(form): FormInput<ExamForm>,
) -> Result<Json<ActionResponse<Exam>>, ActionError> {
    let result = ExamService::create_exam(&state.db, form).await;
    track_action("exam", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/exams",
    params(ListParams, LessonWorkFilter),
    responses(
        (status = 200, description = "Page of exams", body = Paginated<Exam>)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn list_exams(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<LessonWorkFilter>,
) -> Result<Json<Paginated<Exam>>, ActionError> {
    let page = ExamService::list_exams(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/exams/{id}",
    params(("id" = i32, Path, description = "Exam id")),
    responses(
        (status = 200, description = "Exam", body = Exam),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Exam>, ActionError> {
    let exam = ExamService::get_exam(&state.db, id).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    put,
    path = "/list/exams/{id}",
    params(("id" = i32, Path, description = "Exam id")),
    request_body(content = ExamForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Exam updated", body = ActionResponse<Exam>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state, form))]
pub async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<ExamForm>,
) -> Result<Json<ActionResponse<Exam>>, ActionError> {
    let result = ExamService::update_exam(&state.db, id, form).await;
    track_action("exam", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/exams/{id}",
    params(("id" = i32, Path, description = "Exam id")),
    responses(
        (status = 200, description = "Exam deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Exam still has results")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = ExamService::delete_exam(&state.db, id).await;
    track_action("exam", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
