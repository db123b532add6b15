use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Parent, ParentDetail, ParentForm};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::parents::service::ParentService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/parents",
    request_body(content = ParentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Parent created with an identity account", body = ActionResponse<ParentDetail>),
        (status = 403, description = "Caller may not modify parents"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Username, email or phone already taken"),
        (status = 502, description = "Identity provider unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state, form))]
pub async fn create_parent(
    State(state): State<AppState>,
    FormInput(form): FormInput<ParentForm>,
) -> Result<Json<ActionResponse<ParentDetail>>, ActionError> {
    let result = ParentService::create_parent(&state.db, &state.identity, form).await;
    track_action("parent", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/parents",
    params(ListParams),
    responses(
        (status = 200, description = "Page of parents", body = Paginated<Parent>)
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn list_parents(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<Parent>>, ActionError> {
    let page = ParentService::list_parents(&state.db, &params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/parents/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    responses(
        (status = 200, description = "Parent with the ids of their children", body = ParentDetail),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn get_parent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ParentDetail>, ActionError> {
    let parent = ParentService::get_parent(&state.db, &id).await?;
    Ok(Json(parent))
}

#[utoipa::path(
    put,
    path = "/list/parents/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    request_body(content = ParentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Parent updated", body = ActionResponse<ParentDetail>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed"),
        (status = 502, description = "Identity provider unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state, form))]
pub async fn update_parent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormInput(form): FormInput<ParentForm>,
) -> Result<Json<ActionResponse<ParentDetail>>, ActionError> {
    let result = ParentService::update_parent(&state.db, &state.identity, &id, form).await;
    track_action("parent", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/parents/{id}",
    params(("id" = String, Path, description = "Identity provider user id")),
    responses(
        (status = 200, description = "Parent and identity account deleted", body = ActionResponse<String>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Parent still has students")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn delete_parent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse<String>>, ActionError> {
    let result = ParentService::delete_parent(&state.db, &state.identity, &id).await;
    track_action("parent", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
