mod common;

use axum::http::StatusCode;
use common::{
    bearer, body_json, create_test_class, create_test_grade, create_test_parent, create_test_student,
    get_request, json_request, setup_test_app, student_form, unique_username,
};
use schoolboard_core::Role;
use schoolboard_identity::InMemoryIdentityProvider;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_then_read(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 1).await;
    let class_id = create_test_class(&pool, "1A", 20, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_1").await;
    let admin = bearer("admin_1", Role::Admin);
    let username = unique_username("stu");

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request(
            "POST",
            "/list/students",
            Some(&admin),
            student_form(&username, &parent_id, class_id, grade_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(identity.contains(&id));
    assert!(identity.password_matches(&id, "password123"));

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(get_request(&format!("/list/students/{}", id), Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], username);
    assert_eq!(body["class_id"], class_id);
    assert_eq!(body["blood_type"], "O-");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_full_class_rejects_student_before_provider_call(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 2).await;
    let class_id = create_test_class(&pool, "2A", 1, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_2").await;
    create_test_student(&pool, "student_existing", &parent_id, class_id, grade_id).await;

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request(
            "POST",
            "/list/students",
            Some(&bearer("admin_1", Role::Admin)),
            student_form(&unique_username("stu"), &parent_id, class_id, grade_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "capacity_exceeded");
    assert!(identity.is_empty());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE class_id = $1")
        .bind(class_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_class_is_a_validation_error(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 3).await;
    let parent_id = create_test_parent(&pool, "parent_3").await;

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request(
            "POST",
            "/list/students",
            Some(&bearer("admin_1", Role::Admin)),
            student_form(&unique_username("stu"), &parent_id, 9999, grade_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["kind"], "validation_failed");
    assert_eq!(body["fields"][0]["field"], "class_id");
    assert!(identity.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_insert_removes_new_account(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 4).await;
    let class_id = create_test_class(&pool, "4A", 20, grade_id).await;

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request(
            "POST",
            "/list/students",
            Some(&bearer("admin_1", Role::Admin)),
            student_form(&unique_username("stu"), "no_such_parent", class_id, grade_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["kind"], "database_error");
    assert!(identity.is_empty(), "account should be removed after the insert failed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_password_on_create(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 5).await;
    let class_id = create_test_class(&pool, "5A", 20, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_5").await;

    let mut form = student_form(&unique_username("stu"), &parent_id, class_id, grade_id);
    form["password"] = serde_json::json!("");

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request("POST", "/list/students", Some(&bearer("admin_1", Role::Admin)), form))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["fields"][0]["field"], "password");
    assert!(identity.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_with_provider_outage_leaves_row_unchanged(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 6).await;
    let class_id = create_test_class(&pool, "6A", 20, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_6").await;
    let admin = bearer("admin_1", Role::Admin);
    let username = unique_username("stu");

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request(
            "POST",
            "/list/students",
            Some(&admin),
            student_form(&username, &parent_id, class_id, grade_id),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["data"]["id"].as_str().unwrap().to_string();

    identity.set_unavailable(true);

    let mut form = student_form(&username, &parent_id, class_id, grade_id);
    form["name"] = serde_json::json!("Augusta");
    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request("PUT", &format!("/list/students/{}", id), Some(&admin), form))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["kind"], "upstream_error");

    let name: String = sqlx::query_scalar("SELECT name FROM students WHERE id = $1")
        .bind(&id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Ada");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_tolerates_missing_account(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 7).await;
    let class_id = create_test_class(&pool, "7A", 20, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_7").await;
    create_test_student(&pool, "student_orphan", &parent_id, class_id, grade_id).await;

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri("/list/students/student_orphan")
                .header("authorization", bearer("admin_1", Role::Admin))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], "student_orphan");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE id = 'student_orphan'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_cannot_create_student(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 8).await;
    let class_id = create_test_class(&pool, "8A", 20, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_8").await;

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(json_request(
            "POST",
            "/list/students",
            Some(&bearer("teacher_1", Role::Teacher)),
            student_form(&unique_username("stu"), &parent_id, class_id, grade_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(identity.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_students_filters_by_class(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let grade_id = create_test_grade(&pool, 9).await;
    let class_a = create_test_class(&pool, "9A", 20, grade_id).await;
    let class_b = create_test_class(&pool, "9B", 20, grade_id).await;
    let parent_id = create_test_parent(&pool, "parent_9").await;
    create_test_student(&pool, "student_a1", &parent_id, class_a, grade_id).await;
    create_test_student(&pool, "student_a2", &parent_id, class_a, grade_id).await;
    create_test_student(&pool, "student_b1", &parent_id, class_b, grade_id).await;

    let app = setup_test_app(pool.clone(), &identity);
    let response = app
        .oneshot(get_request(
            &format!("/list/students?class_id={}&limit=1", class_a),
            Some(&bearer("teacher_1", Role::Teacher)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["total_pages"], 2);
    assert_eq!(body["meta"]["has_more"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
