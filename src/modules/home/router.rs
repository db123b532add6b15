use crate::modules::home::controller::{get_profile, health, role_home, sign_in};
use crate::state::AppState;
use axum::{Router, routing::get};
use schoolboard_core::Role;

/// Role homes, profile, health and the sign-in page (mounted at the
/// configured sign-in path).
pub fn init_home_router(sign_in_path: &str) -> Router<AppState> {
    let router = Role::ALL
        .iter()
        .fold(Router::new(), |router, role| router.route(&role.home_path(), get(role_home)));

    router
        .route("/profile", get(get_profile))
        .route(sign_in_path, get(sign_in))
        .route("/health", get(health))
}
