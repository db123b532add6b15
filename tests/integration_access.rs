//! Route access through the full router. None of these requests reach the
//! database, so the pool is never connected.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{bearer, body_json, get_request, json_request, setup_test_app, test_jwt_config};
use schoolboard_auth::create_session_token;
use schoolboard_core::Role;
use schoolboard_identity::InMemoryIdentityProvider;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn app() -> axum::Router {
    let pool = PgPool::connect_lazy("postgres://localhost/schoolboard_unused").unwrap();
    setup_test_app(pool, &InMemoryIdentityProvider::new())
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_anonymous_request_redirects_to_sign_in() {
    let response = app().oneshot(get_request("/list/teachers", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/sign-in");
}

#[tokio::test]
async fn test_invalid_token_counts_as_anonymous() {
    let response = app()
        .oneshot(get_request("/list/exams", Some("Bearer not-a-real-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/sign-in");
}

#[tokio::test]
async fn test_student_is_sent_home_from_staff_pages() {
    let response = app()
        .oneshot(get_request("/list/teachers", Some(&bearer("student_1", Role::Student))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/student");
}

#[tokio::test]
async fn test_parent_is_sent_home_from_other_role_home() {
    let response = app()
        .oneshot(get_request("/admin", Some(&bearer("parent_1", Role::Parent))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/parent");
}

#[tokio::test]
async fn test_signed_in_user_is_sent_home_from_sign_in() {
    let response = app()
        .oneshot(get_request("/sign-in", Some(&bearer("teacher_1", Role::Teacher))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/teacher");
}

#[tokio::test]
async fn test_anonymous_sign_in_page() {
    let response = app().oneshot(get_request("/sign-in", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sign_in_url"], "/sign-in");
}

#[tokio::test]
async fn test_role_home_via_session_cookie() {
    let token = create_session_token("teacher_7", Some(Role::Teacher), &test_jwt_config()).unwrap();
    let request = Request::builder()
        .method("GET")
        .uri("/teacher")
        .header(header::COOKIE, format!("__session={}", token))
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], "teacher");
    assert_eq!(body["user_id"], "teacher_7");
    assert!(body.get("counts").is_none());
}

#[tokio::test]
async fn test_missing_role_claim_uses_fallback_role() {
    let token = create_session_token("someone", None, &test_jwt_config()).unwrap();
    let response = app()
        .oneshot(get_request("/teacher", Some(&format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/admin");
}

#[tokio::test]
async fn test_student_cannot_modify_coursework() {
    let request = Request::builder()
        .method("DELETE")
        .uri("/list/exams/1")
        .header(header::AUTHORIZATION, bearer("student_1", Role::Student))
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_teacher_write_reaches_handler() {
    // Empty body fails parsing before any query runs
    let response = app()
        .oneshot(json_request(
            "POST",
            "/list/exams",
            Some(&bearer("teacher_1", Role::Teacher)),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "validation_failed");
}

#[tokio::test]
async fn test_unlisted_path_is_public() {
    let response = app().oneshot(get_request("/api-docs/openapi.json", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = app().oneshot(get_request("/sign-in", None)).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
