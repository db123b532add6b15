use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Attendance, AttendanceFilter, AttendanceForm};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/attendance",
    request_body(content = AttendanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Attendance recorded", body = ActionResponse<Attendance>),
        (status = 403, description = "Caller may not modify attendance"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Unknown student or lesson")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, form))]
pub async fn create_attendance(
    State(state): State<AppState>,
    FormInput(form): FormInput<AttendanceForm>,
) -> Result<Json<ActionResponse<Attendance>>, ActionError> {
    let result = AttendanceService::create_attendance(&state.db, form).await;
    track_action("attendance", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/attendance",
    params(ListParams, AttendanceFilter),
    responses(
        (status = 200, description = "Page of attendance", body = Paginated<Attendance>)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<AttendanceFilter>,
) -> Result<Json<Paginated<Attendance>>, ActionError> {
    let page = AttendanceService::list_attendance(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Attendance record", body = Attendance),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Attendance>, ActionError> {
    let attendance = AttendanceService::get_attendance(&state.db, id).await?;
    Ok(Json(attendance))
}

#[utoipa::path(
    put,
    path = "/list/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance id")),
    request_body(content = AttendanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Attendance updated", body = ActionResponse<Attendance>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, form))]
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<AttendanceForm>,
) -> Result<Json<ActionResponse<Attendance>>, ActionError> {
    let result = AttendanceService::update_attendance(&state.db, id, form).await;
    track_action("attendance", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Attendance deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = AttendanceService::delete_attendance(&state.db, id).await;
    track_action("attendance", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
