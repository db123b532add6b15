mod common;

use axum::http::StatusCode;
use common::{
    bearer, body_json, create_test_class, create_test_grade, create_test_parent, create_test_student,
    delete_request, get_request, json_request, parent_form, setup_test_app, unique_username,
};
use schoolboard_core::Role;
use schoolboard_identity::InMemoryIdentityProvider;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_parent_then_read(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let admin = bearer("admin_1", Role::Admin);
    let username = unique_username("par");

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request("POST", "/list/parents", Some(&admin), parent_form(&username)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(identity.contains(&id));
    assert_eq!(body["data"]["email"], serde_json::Value::Null);

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(get_request(&format!("/list/parents/{}", id), Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], username);
    assert_eq!(body["surname"], "Somerville");
    assert_eq!(body["email"], serde_json::Value::Null);
    assert_eq!(body["student_ids"], json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_parent_keeps_password_when_blank(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let admin = bearer("admin_1", Role::Admin);
    let username = unique_username("par");

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request("POST", "/list/parents", Some(&admin), parent_form(&username)))
        .await
        .unwrap();
    let id = body_json(response).await["data"]["id"].as_str().unwrap().to_string();

    let mut form = parent_form(&username);
    form["password"] = json!("");
    form["email"] = json!("mary@school.test");

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request("PUT", &format!("/list/parents/{}", id), Some(&admin), form))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "mary@school.test");
    assert!(identity.password_matches(&id, "password123"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_parent_without_account(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    create_test_parent(&pool, "parent_unlinked").await;

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(delete_request("/list/parents/parent_unlinked", &bearer("admin_1", Role::Admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], "parent_unlinked");

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM parents WHERE id = 'parent_unlinked')")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(!exists);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_parent_with_students_cannot_be_deleted(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 1).await;
    let class_id = create_test_class(&pool, "1A", 20, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_busy").await;
    create_test_student(&pool, "student_child", &parent_id, class_id, grade_id).await;

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(delete_request("/list/parents/parent_busy", &bearer("admin_1", Role::Admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["kind"], "database_error");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_missing_parent_is_not_found(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(delete_request("/list/parents/nobody", &bearer("admin_1", Role::Admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
