use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{ExamResult, ResultFilter, ResultForm};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::results::service::ResultService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/results",
    request_body(content = ResultForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Result recorded", body = ActionResponse<ExamResult>),
        (status = 403, description = "Caller may not modify results"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Unknown student, exam or assignment")
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state, form))]
pub async fn create_result(
    State(state): State<AppState>,
    FormInput(form): FormInput<ResultForm>,
) -> Result<Json<ActionResponse<ExamResult>>, ActionError> {
    let result = ResultService::create_result(&state.db, form).await;
    track_action("result", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/results",
    params(ListParams, ResultFilter),
    responses(
        (status = 200, description = "Page of results", body = Paginated<ExamResult>)
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn list_results(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ResultFilter>,
) -> Result<Json<Paginated<ExamResult>>, ActionError> {
    let page = ResultService::list_results(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/results/{id}",
    params(("id" = i32, Path, description = "Result id")),
    responses(
        (status = 200, description = "Result", body = ExamResult),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ExamResult>, ActionError> {
    let result = ResultService::get_result(&state.db, id).await?;
    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/list/results/{id}",
    params(("id" = i32, Path, description = "Result id")),
    request_body(content = ResultForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Result updated", body = ActionResponse<ExamResult>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state, form))]
pub async fn update_result(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<ResultForm>,
) -> Result<Json<ActionResponse<ExamResult>>, ActionError> {
    let result = ResultService::update_result(&state.db, id, form).await;
    track_action("result", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/results/{id}",
    params(("id" = i32, Path, description = "Result id")),
    responses(
        (status = 200, description = "Result deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn delete_result(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = ResultService::delete_result(&state.db, id).await;
    track_action("result", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
