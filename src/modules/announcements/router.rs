use crate::modules::announcements::controller::{
    create_announcement, delete_announcement, get_announcement, list_announcements, update_announcement,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_announcements_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_announcement).get(list_announcements))
        .route(
            "/{id}",
            get(get_announcement).put(update_announcement).delete(delete_announcement),
        )
}
