use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Subject, SubjectDetail, SubjectFilter, SubjectForm};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/subjects",
    request_body(content = SubjectForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Subject created", body = ActionResponse<SubjectDetail>),
        (status = 403, description = "Caller may not modify subjects"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Subject name already taken or unknown teacher")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, form))]
pub async fn create_subject(
    State(state): State<AppState>,
    FormInput(form): FormInput<SubjectForm>,
) -> Result<Json<ActionResponse<SubjectDetail>>, ActionError> {
    let result = SubjectService::create_subject(&state.db, form).await;
    track_action("subject", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/subjects",
    params(ListParams, SubjectFilter),
    responses(
        (status = 200, description = "Page of subjects", body = Paginated<Subject>)
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn list_subjects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<SubjectFilter>,
) -> Result<Json<Paginated<Subject>>, ActionError> {
    let page = SubjectService::list_subjects(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/subjects/{id}",
    params(("id" = i32, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Subject with the ids of its teachers", body = SubjectDetail),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubjectDetail>, ActionError> {
    let subject = SubjectService::get_subject(&state.db, id).await?;
    Ok(Json(subject))
}

#[utoipa::path(
    put,
    path = "/list/subjects/{id}",
    params(("id" = i32, Path, description = "Subject id")),
    request_body(content = SubjectForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Subject updated; teachers replaced", body = ActionResponse<SubjectDetail>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, form))]
pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<SubjectForm>,
) -> Result<Json<ActionResponse<SubjectDetail>>, ActionError> {
    let result = SubjectService::update_subject(&state.db, id, form).await;
    track_action("subject", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/subjects/{id}",
    params(("id" = i32, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Subject deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Subject still has lessons")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = SubjectService::delete_subject(&state.db, id).await;
    track_action("subject", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
