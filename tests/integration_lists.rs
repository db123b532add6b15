mod common;

use axum::http::StatusCode;
use common::{
    bearer, body_json, create_test_class, create_test_grade, create_test_parent, create_test_student,
    create_test_subject, create_test_teacher, get_request, json_request, setup_test_app,
};
use schoolboard_core::Role;
use schoolboard_identity::InMemoryIdentityProvider;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn get_json(pool: &PgPool, uri: &str, role: Role) -> serde_json::Value {
    let app = setup_test_app(pool.clone(), &InMemoryIdentityProvider::new());
    let response = app
        .oneshot(get_request(uri, Some(&bearer("user_1", role))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    body_json(response).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_list_reports_student_count(pool: PgPool) {
    let grade_id = create_test_grade(&pool, 1).await;
    let class_a = create_test_class(&pool, "Alpha", 2, grade_id).await;
    create_test_class(&pool, "Beta", 2, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_1").await;
    create_test_student(&pool, "student_1", &parent_id, class_a, grade_id).await;

    let body = get_json(&pool, "/list/classes?search=alp", Role::Teacher).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["name"], "Alpha");
    assert_eq!(body["data"][0]["student_count"], 1);

    let body = get_json(&pool, &format!("/list/classes/{}", class_a), Role::Admin).await;
    assert_eq!(body["capacity"], 2);
    assert_eq!(body["student_count"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sort_and_order(pool: PgPool) {
    for name in ["Biology", "Art", "Chemistry"] {
        create_test_subject(&pool, name).await;
    }

    let body = get_json(&pool, "/list/subjects?sort=name&order=desc", Role::Admin).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Chemistry", "Biology", "Art"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_events_include_school_wide_items(pool: PgPool) {
    let grade_id = create_test_grade(&pool, 2).await;
    let class_a = create_test_class(&pool, "2A", 20, grade_id).await;
    let class_b = create_test_class(&pool, "2B", 20, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_2").await;
    create_test_student(&pool, "student_2", &parent_id, class_a, grade_id).await;

    for (title, class_id) in [("Sports day", None), ("2A trip", Some(class_a)), ("2B trip", Some(class_b))] {
        sqlx::query(
            "INSERT INTO events (title, description, start_time, end_time, class_id)
             VALUES ($1, 'details', NOW(), NOW() + INTERVAL '1 hour', $2)",
        )
        .bind(title)
        .bind(class_id)
        .execute(&pool)
        .await
        .unwrap();
    }

    let body = get_json(&pool, &format!("/list/events?class_id={}&sort=title", class_a), Role::Parent).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["2A trip", "Sports day"]);

    let body = get_json(&pool, "/list/events?student_id=student_2", Role::Student).await;
    assert_eq!(body["meta"]["total"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_coursework_lifecycle(pool: PgPool) {
    let grade_id = create_test_grade(&pool, 3).await;
    let class_id = create_test_class(&pool, "3A", 20, grade_id).await;
    let subject_id = create_test_subject(&pool, "History").await;
    let teacher_id = create_test_teacher(&pool, "teacher_3").await;
    let teacher = bearer(&teacher_id, Role::Teacher);
    let admin = bearer("admin_1", Role::Admin);

    let app = setup_test_app(pool.clone(), &InMemoryIdentityProvider::new());
    let response = app
        .oneshot(json_request(
            "POST",
            "/list/lessons",
            Some(&admin),
            json!({
                "name": "History 3A",
                "day": "MONDAY",
                "start_time": "2024-09-02T09:00",
                "end_time": "2024-09-02T10:00",
                "subject_id": subject_id,
                "class_id": class_id,
                "teacher_id": teacher_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let lesson_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = setup_test_app(pool.clone(), &InMemoryIdentityProvider::new());
    let response = app
        .oneshot(json_request(
            "POST",
            "/list/exams",
            Some(&teacher),
            json!({
                "title": "Midterm",
                "start_time": "2024-10-14T09:00",
                "end_time": "2024-10-14T10:30",
                "lesson_id": lesson_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let exam_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = get_json(&pool, &format!("/list/exams?teacher_id={}", teacher_id), Role::Teacher).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["id"], exam_id);

    let body = get_json(&pool, &format!("/list/exams?class_id={}", class_id + 1), Role::Teacher).await;
    assert_eq!(body["meta"]["total"], 0);

    // Lessons with exams cannot be removed
    let app = setup_test_app(pool.clone(), &InMemoryIdentityProvider::new());
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/list/lessons/{}", lesson_id))
                .header("authorization", admin.as_str())
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_home_counts(pool: PgPool) {
    let grade_id = create_test_grade(&pool, 4).await;
    create_test_class(&pool, "4A", 20, grade_id).await;
    create_test_teacher(&pool, "teacher_4").await;
    create_test_parent(&pool, "parent_4").await;

    let body = get_json(&pool, "/admin", Role::Admin).await;
    assert_eq!(body["role"], "admin");
    assert_eq!(body["counts"]["teachers"], 1);
    assert_eq!(body["counts"]["parents"], 1);
    assert_eq!(body["counts"]["classes"], 1);
    assert_eq!(body["counts"]["students"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_class_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool.clone(), &InMemoryIdentityProvider::new());
    let response = app
        .oneshot(json_request(
            "PUT",
            "/list/classes/999",
            Some(&bearer("admin_1", Role::Admin)),
            json!({ "name": "Ghost", "capacity": 10, "grade_id": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["kind"], "not_found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_page_past_the_end_is_empty(pool: PgPool) {
    create_test_parent(&pool, "parent_far").await;

    let body = get_json(&pool, "/list/parents?page=9223372036854775807&limit=100", Role::Admin).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["has_more"], false);
    assert!(body["data"].as_array().unwrap().is_empty());
}
