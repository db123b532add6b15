use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolboard_core::{ActionError, ActionResponse, ListParams, Paginated};
use schoolboard_models::{ClassScopeFilter, Event, EventForm};
use tracing::instrument;

use crate::metrics::track_action;
use crate::modules::events::service::EventService;
use crate::state::AppState;
use crate::validator::FormInput;

#[utoipa::path(
    post,
    path = "/list/events",
    request_body(content = EventForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Event created", body = ActionResponse<Event>),
        (status = 403, description = "Caller may not modify events"),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Unknown class")
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, form))]
pub async fn create_event(
    State(state): State<AppState>,
    FormInput(form): FormInput<EventForm>,
) -> Result<Json<ActionResponse<Event>>, ActionError> {
    let result = EventService::create_event(&state.db, form).await;
    track_action("event", "create", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    get,
    path = "/list/events",
    params(ListParams, ClassScopeFilter),
    responses(
        (status = 200, description = "Page of events", body = Paginated<Event>)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<ClassScopeFilter>,
) -> Result<Json<Paginated<Event>>, ActionError> {
    let page = EventService::list_events(&state.db, &params, &filter).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/list/events/{id}",
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Event>, ActionError> {
    let event = EventService::get_event(&state.db, id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/list/events/{id}",
    params(("id" = i32, Path, description = "Event id")),
    request_body(content = EventForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Event updated", body = ActionResponse<Event>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, form))]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    FormInput(form): FormInput<EventForm>,
) -> Result<Json<ActionResponse<Event>>, ActionError> {
    let result = EventService::update_event(&state.db, id, form).await;
    track_action("event", "update", &result);
    Ok(Json(ActionResponse::ok(result?)))
}

#[utoipa::path(
    delete,
    path = "/list/events/{id}",
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = ActionResponse<i32>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActionResponse<i32>>, ActionError> {
    let result = EventService::delete_event(&state.db, id).await;
    track_action("event", "delete", &result);
    result?;
    Ok(Json(ActionResponse::ok(id)))
}
