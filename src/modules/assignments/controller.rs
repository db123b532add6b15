use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Assignment, AssignmentForm, LessonWorkFilter};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::assignments::service::AssignmentService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/assignments",
    request_body(content = AssignmentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Assignment created", body = ActionResponse<Assignment>),
        (status = 403, description = "Caller may not modify assignments"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Unknown lesson")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, form))]
pub async fn create_assignment(
    State(state): State<AppState>,
    FormInput(form): FormInput<AssignmentForm>,
) -> Result<Json<ActionResponse<Assignment>>, ActionError> {
    let result = AssignmentService::create_assignment(&state.db, form).await;
    track_action("assignment", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/assignments",
    params(ListParams, LessonWorkFilter),
    responses(
        (status = 200, description = "Page of assignments", body = Paginated<Assignment>)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<LessonWorkFilter>,
) -> Result<Json<Paginated<Assignment>>, ActionError> {
    let page = AssignmentService::list_assignments(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/assignments/{id}",
    params(("id" = i32, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Assignment", body = Assignment),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Assignment>, ActionError> {
    let assignment = AssignmentService::get_assignment(&state.db, id).await?;
    Ok(Json(assignment))
}

#[utoipa::path(
    put,
    path = "/list/assignments/{id}",
    params(("id" = i32, Path, description = "Assignment id")),
    request_body(content = AssignmentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Assignment updated", body = ActionResponse<Assignment>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, form))]
pub async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<AssignmentForm>,
) -> Result<Json<ActionResponse<Assignment>>, ActionError> {
    let result = AssignmentService::update_assignment(&state.db, id, form).await;
    track_action("assignment", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/assignments/{id}",
    params(("id" = i32, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Assignment deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Assignment still has results")
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = AssignmentService::delete_assignment(&state.db, id).await;
    track_action("assignment", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
