#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use schoolboard::router::init_router;
use schoolboard::state::AppState;
use schoolboard_auth::create_session_token;
use schoolboard_config::{AccessConfig, CorsConfig, IdentityConfig, JwtConfig};
use schoolboard_core::Role;
use schoolboard_identity::InMemoryIdentityProvider;
use sqlx::PgPool;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        session_expiry: 3600,
    }
}

pub fn test_state(pool: PgPool, identity: &InMemoryIdentityProvider) -> AppState {
    AppState {
        db: pool,
        identity: identity.clone().into(),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        access_config: AccessConfig::default(),
        identity_config: IdentityConfig::memory(),
    }
}

pub fn setup_test_app(pool: PgPool, identity: &InMemoryIdentityProvider) -> axum::Router {
    init_router(test_state(pool, identity))
}

pub fn bearer(user_id: &str, role: Role) -> String {
    let token = create_session_token(user_id, Some(role), &test_jwt_config()).unwrap();
    format!("Bearer {}", token)
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete_request(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap()
}

pub fn form_request(method: &str, uri: &str, auth: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .header("authorization", auth)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn unique_username(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &suffix[..8])
}

pub async fn create_test_grade(pool: &PgPool, level: i32) -> i32 {
    sqlx::query_scalar("INSERT INTO grades (level) VALUES ($1) RETURNING id")
        .bind(level)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_class(pool: &PgPool, name: &str, capacity: i32, grade_id: i32) -> i32 {
    sqlx::query_scalar("INSERT INTO classes (name, capacity, grade_id) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(capacity)
        .bind(grade_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_subject(pool: &PgPool, name: &str) -> i32 {
    sqlx::query_scalar("INSERT INTO subjects (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Parent row without an identity account.
pub async fn create_test_parent(pool: &PgPool, id: &str) -> String {
    sqlx::query_scalar(
        "INSERT INTO parents (id, username, name, surname, phone, address)
         VALUES ($1, $1, 'Test', 'Parent', $2, '1 Test Street')
         RETURNING id",
    )
    .bind(id)
    .bind(format!("+1-555-{}", &Uuid::new_v4().simple().to_string()[..8]))
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Teacher row without an identity account.
pub async fn create_test_teacher(pool: &PgPool, id: &str) -> String {
    sqlx::query_scalar(
        "INSERT INTO teachers (id, username, name, surname, address, blood_type, sex, birthday)
         VALUES ($1, $1, 'Test', 'Teacher', '2 Test Street', 'O+', 'FEMALE', '1985-03-04T00:00:00Z')
         RETURNING id",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_student(pool: &PgPool, id: &str, parent_id: &str, class_id: i32, grade_id: i32) -> String {
    sqlx::query_scalar(
        "INSERT INTO students (id, username, name, surname, address, blood_type, sex, birthday, parent_id, class_id, grade_id)
         VALUES ($1, $1, 'Test', 'Student', '3 Test Street', 'A+', 'MALE', '2012-06-01T00:00:00Z', $2, $3, $4)
         RETURNING id",
    )
    .bind(id)
    .bind(parent_id)
    .bind(class_id)
    .bind(grade_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_lesson(pool: &PgPool, subject_id: i32, class_id: i32, teacher_id: &str) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO lessons (name, day, start_time, end_time, subject_id, class_id, teacher_id)
         VALUES ('Test lesson', 'MONDAY', '2024-09-02T09:00:00Z', '2024-09-02T10:00:00Z', $1, $2, $3)
         RETURNING id",
    )
    .bind(subject_id)
    .bind(class_id)
    .bind(teacher_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn teacher_form(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password": "password123",
        "name": "Grace",
        "surname": "Hopper",
        "email": format!("{}@school.test", username),
        "address": "7 Harbour Road",
        "blood_type": "AB+",
        "sex": "FEMALE",
        "birthday": "1980-12-09",
        "subjects": [],
        "classes": []
    })
}

pub fn parent_form(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password": "password123",
        "name": "Mary",
        "surname": "Somerville",
        "email": "",
        "phone": format!("+44-{}", &Uuid::new_v4().simple().to_string()[..8]),
        "address": "5 Burntisland Road"
    })
}

pub fn student_form(username: &str, parent_id: &str, class_id: i32, grade_id: i32) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password": "password123",
        "name": "Ada",
        "surname": "Lovelace",
        "address": "12 Analytical Lane",
        "blood_type": "O-",
        "sex": "FEMALE",
        "birthday": "2012-12-10",
        "grade_id": grade_id,
        "class_id": class_id,
        "parent_id": parent_id
    })
}
