use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Class, ClassFilter, ClassForm, ClassWithStats};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/classes",
    request_body(content = ClassForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Class created", body = ActionResponse<Class>),
        (status = 403, description = "Caller may not modify classes"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Class name already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, form))]
pub async fn create_class(
    State(state): State<AppState>,
    FormInput(form): FormInput<ClassForm>,
) -> Result<Json<ActionResponse<Class>>, ActionError> {
    let result = ClassService::create_class(&state.db, form).await;
    track_action("class", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/classes",
    params(ListParams, ClassFilter),
    responses(
        (status = 200, description = "Page of classes", body = Paginated<ClassWithStats>)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ClassFilter>,
) -> Result<Json<Paginated<ClassWithStats>>, ActionError> {
    let page = ClassService::list_classes(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/classes/{id}",
    params(("id" = i32, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class with its current enrolment", body = ClassWithStats),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ClassWithStats>, ActionError> {
    let class_row = ClassService::get_class(&state.db, id).await?;
    Ok(Json(class_row))
}

#[utoipa::path(
    put,
    path = "/list/classes/{id}",
    params(("id" = i32, Path, description = "Class id")),
    request_body(content = ClassForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Class updated", body = ActionResponse<Class>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, form))]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<ClassForm>,
) -> Result<Json<ActionResponse<Class>>, ActionError> {
    let result = ClassService::update_class(&state.db, id, form).await;
    track_action("class", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/classes/{id}",
    params(("id" = i32, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Class still has students, lessons or notices")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = ClassService::delete_class(&state.db, id).await;
    track_action("class", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
