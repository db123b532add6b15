use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{Announcement, AnnouncementForm, ClassScopeFilter};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::announcements::service::AnnouncementService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/announcements",
    request_body(content = AnnouncementForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Announcement published", body = ActionResponse<Announcement>),
        (status = 403, description = "Caller may not modify announcements"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Unknown class")
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, form))]
pub async fn create_announcement(
    State(state): State<AppState>,
    FormInput(form): FormInput<AnnouncementForm>,
) -> Result<Json<ActionResponse<Announcement>>, ActionError> {
    let result = AnnouncementService::create_announcement(&state.db, form).await;
    track_action("announcement", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/announcements",
    params(ListParams, ClassScopeFilter),
    responses(
        (status = 200, description = "Page of announcements", body = Paginated<Announcement>)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ClassScopeFilter>,
) -> Result<Json<Paginated<Announcement>>, ActionError> {
    let page = AnnouncementService::list_announcements(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement", body = Announcement),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Announcement>, ActionError> {
    let announcement = AnnouncementService::get_announcement(&state.db, id).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    put,
    path = "/list/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement id")),
    request_body(content = AnnouncementForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Announcement updated", body = ActionResponse<Announcement>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, form))]
pub async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<AnnouncementForm>,
) -> Result<Json<ActionResponse<Announcement>>, ActionError> {
    let result = AnnouncementService::update_announcement(&state.db, id, form).await;
    track_action("announcement", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = AnnouncementService::delete_announcement(&state.db, id).await;
    track_action("announcement", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
