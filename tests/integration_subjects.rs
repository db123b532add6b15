mod common;

use axum::http::StatusCode;
use common::{bearer, body_json, create_test_teacher, delete_request, get_request, json_request, setup_test_app};
use schoolboard_core::Role;
use schoolboard_identity::InMemoryIdentityProvider;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn send(pool: &PgPool, request: axum::http::Request<axum::body::Body>) -> (StatusCode, serde_json::Value) {
    let app = setup_test_app(pool.clone(), &InMemoryIdentityProvider::new());
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_teacher_set(pool: PgPool) {
    for id in ["t_one", "t_two", "t_three"] {
        create_test_teacher(&pool, id).await;
    }
    let admin = bearer("admin_1", Role::Admin);

    let (status, body) = send(
        &pool,
        json_request(
            "POST",
            "/list/subjects",
            Some(&admin),
            json!({ "name": "Art", "teachers": ["t_one", "t_two"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["teacher_ids"], json!(["t_one", "t_two"]));

    let (status, body) = send(
        &pool,
        json_request(
            "PUT",
            &format!("/list/subjects/{}", id),
            Some(&admin),
            json!({ "name": "Fine Art", "teachers": ["t_two", "t_three"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Fine Art");
    assert_eq!(body["data"]["teacher_ids"], json!(["t_three", "t_two"]));

    let (status, body) = send(&pool, get_request(&format!("/list/subjects/{}", id), Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teacher_ids"], json!(["t_three", "t_two"]));

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subject_teachers WHERE subject_id = $1")
        .bind(id as i32)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_clearing_teachers_removes_all_links(pool: PgPool) {
    create_test_teacher(&pool, "t_one").await;
    let admin = bearer("admin_1", Role::Admin);

    let (_, body) = send(
        &pool,
        json_request("POST", "/list/subjects", Some(&admin), json!({ "name": "Music", "teachers": ["t_one"] })),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &pool,
        json_request("PUT", &format!("/list/subjects/{}", id), Some(&admin), json!({ "name": "Music" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["teacher_ids"], json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_subject_creates_nothing(pool: PgPool) {
    let (status, body) = send(
        &pool,
        json_request(
            "PUT",
            "/list/subjects/4040",
            Some(&bearer("admin_1", Role::Admin)),
            json!({ "name": "Ghost", "teachers": [] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    let subjects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(subjects, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_subject(pool: PgPool) {
    let admin = bearer("admin_1", Role::Admin);
    let (_, body) = send(
        &pool,
        json_request("POST", "/list/subjects", Some(&admin), json!({ "name": "Latin" })),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&pool, delete_request(&format!("/list/subjects/{}", id), &admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], id);

    let (status, _) = send(&pool, delete_request(&format!("/list/subjects/{}", id), &admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
