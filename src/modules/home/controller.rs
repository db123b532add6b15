use axum::{Json, extract::State, http::StatusCode};
use schoolboard_core::AppError;
use tracing::instrument;

use crate::middleware::session::Session;
use crate::modules::home::model::{HealthResponse, HomeResponse, ProfileResponse, SignInResponse};
use crate::modules::home::service::HomeService;
use crate::state::AppState;

/// Role landing page. The access middleware only lets a caller reach their
/// own role's home, so the same handler serves all four.
#[utoipa::path(
    get,
    path = "/{role}",
    params(("role" = String, Path, description = "admin, teacher, student or parent")),
    responses(
        (status = 200, description = "Caller's home", body = HomeResponse),
        (status = 307, description = "Redirected to the caller's own home or to sign-in")
    ),
    security(("bearer_auth" = [])),
    tag = "Home"
)]
#[instrument(skip(state))]
pub async fn role_home(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<HomeResponse>, AppError> {
    let home = HomeService::home(&state.db, &session).await?;
    Ok(Json(home))
}

#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Identity-provider account of the caller", body = ProfileResponse),
        (status = 404, description = "Account no longer exists at the provider"),
        (status = 502, description = "Identity provider unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Home"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = HomeService::profile(&state.identity, &session).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/sign-in",
    responses(
        (status = 200, description = "Hosted sign-in page", body = SignInResponse),
        (status = 307, description = "Already signed in; redirected home")
    ),
    tag = "Home"
)]
#[instrument(skip(state))]
pub async fn sign_in(State(state): State<AppState>) -> Json<SignInResponse> {
    Json(SignInResponse {
        sign_in_url: state.identity_config.sign_in_url.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "Home"
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_up = HomeService::database_reachable(&state.db).await;
    let status = if database_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if database_up { "ok" } else { "degraded" },
            database: if database_up { "up" } else { "down" },
            identity_backend: state.identity.backend_name(),
        }),
    )
}
