use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::access::route_access;
use crate::modules::announcements::init_announcements_router;
use crate::modules::assignments::init_assignments_router;
use crate::modules::attendance::init_attendance_router;
use crate::modules::classes::init_classes_router;
use crate::modules::events::init_events_router;
use crate::modules::exams::init_exams_router;
use crate::modules::home::init_home_router;
use crate::modules::lessons::init_lessons_router;
use crate::modules::parents::init_parents_router;
use crate::modules::results::init_results_router;
use crate::modules::students::init_students_router;
use crate::modules::subjects::init_subjects_router;
use crate::modules::teachers::init_teachers_router;
use crate::state::AppState;
use axum::http::{HeaderName, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::logging::REQUEST_ID_HEADER;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_home_router(&state.access_config.sign_in_path))
        .nest(
            "/list",
            Router::new()
                .nest("/teachers", init_teachers_router())
                .nest("/students", init_students_router())
                .nest("/parents", init_parents_router())
                .nest("/subjects", init_subjects_router())
                .nest("/classes", init_classes_router())
                .nest("/lessons", init_lessons_router())
                .nest("/exams", init_exams_router())
                .nest("/assignments", init_assignments_router())
                .nest("/results", init_results_router())
                .nest("/attendance", init_attendance_router())
                .nest("/events", init_events_router())
                .nest("/announcements", init_announcements_router()),
        )
        .layer(middleware::from_fn_with_state(state.clone(), route_access))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<_> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
