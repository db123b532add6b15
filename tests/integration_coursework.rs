//! Assignments, results, attendance and announcements through the router.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    bearer, body_json, create_test_class, create_test_grade, create_test_lesson, create_test_parent,
    create_test_student, create_test_subject, create_test_teacher, delete_request, form_request, get_request,
    json_request, setup_test_app,
};
use schoolboard_core::Role;
use schoolboard_identity::InMemoryIdentityProvider;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

struct School {
    class_id: i32,
    lesson_id: i32,
    student_id: String,
}

async fn school(pool: &PgPool) -> School {
    let grade_id = create_test_grade(pool, 5).await;
    let class_id = create_test_class(pool, "5A", 20, grade_id).await;
    let subject_id = create_test_subject(pool, "Geography").await;
    let teacher_id = create_test_teacher(pool, "teacher_5").await;
    let lesson_id = create_test_lesson(pool, subject_id, class_id, &teacher_id).await;
    let parent_id = create_test_parent(pool, "parent_5").await;
    let student_id = create_test_student(pool, "student_5", &parent_id, class_id, grade_id).await;
    School {
        class_id,
        lesson_id,
        student_id,
    }
}

async fn send(pool: &PgPool, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let app = setup_test_app(pool.clone(), &InMemoryIdentityProvider::new());
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assignment_lifecycle(pool: PgPool) {
    let school = school(&pool).await;
    let teacher = bearer("teacher_5", Role::Teacher);

    let (status, body) = send(
        &pool,
        json_request(
            "POST",
            "/list/assignments",
            Some(&teacher),
            json!({
                "title": "River basins",
                "start_date": "2024-10-01",
                "due_date": "2024-10-08T17:00",
                "lesson_id": school.lesson_id.to_string()
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&pool, get_request(&format!("/list/assignments/{}", id), Some(&teacher))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "River basins");
    assert_eq!(body["start_date"], "2024-10-01T00:00:00Z");
    assert_eq!(body["due_date"], "2024-10-08T17:00:00Z");
    assert_eq!(body["lesson_id"], school.lesson_id);

    let (status, body) = send(
        &pool,
        json_request(
            "PUT",
            &format!("/list/assignments/{}", id),
            Some(&teacher),
            json!({
                "title": "River basins (revised)",
                "start_date": "2024-10-01",
                "due_date": "2024-10-15",
                "lesson_id": school.lesson_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "River basins (revised)");

    let (status, _) = send(&pool, delete_request(&format!("/list/assignments/{}", id), &teacher)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&pool, get_request(&format!("/list/assignments/{}", id), Some(&teacher))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_result_may_reference_exam_and_assignment(pool: PgPool) {
    let school = school(&pool).await;
    let teacher = bearer("teacher_5", Role::Teacher);

    let exam_id: i32 = sqlx::query_scalar(
        "INSERT INTO exams (title, start_time, end_time, lesson_id)
         VALUES ('Final', '2024-12-02T09:00:00Z', '2024-12-02T11:00:00Z', $1) RETURNING id",
    )
    .bind(school.lesson_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    let assignment_id: i32 = sqlx::query_scalar(
        "INSERT INTO assignments (title, start_date, due_date, lesson_id)
         VALUES ('Map work', '2024-11-01T00:00:00Z', '2024-11-08T00:00:00Z', $1) RETURNING id",
    )
    .bind(school.lesson_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    let (status, body) = send(
        &pool,
        json_request(
            "POST",
            "/list/results",
            Some(&teacher),
            json!({
                "score": "88",
                "exam_id": exam_id,
                "assignment_id": assignment_id,
                "student_id": school.student_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&pool, get_request(&format!("/list/results/{}", id), Some(&teacher))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 88);
    assert_eq!(body["exam_id"], exam_id);
    assert_eq!(body["assignment_id"], assignment_id);

    let (status, body) = send(
        &pool,
        json_request(
            "PUT",
            &format!("/list/results/{}", id),
            Some(&teacher),
            json!({
                "score": 91,
                "exam_id": "",
                "assignment_id": assignment_id,
                "student_id": school.student_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score"], 91);
    assert_eq!(body["data"]["exam_id"], serde_json::Value::Null);

    let (status, body) = send(
        &pool,
        get_request(&format!("/list/results?student_id={}", school.student_id), Some(&teacher)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, _) = send(&pool, delete_request(&format!("/list/results/{}", id), &teacher)).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_result_score_out_of_range(pool: PgPool) {
    let school = school(&pool).await;

    let (status, body) = send(
        &pool,
        json_request(
            "POST",
            "/list/results",
            Some(&bearer("teacher_5", Role::Teacher)),
            json!({ "score": 140, "student_id": school.student_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"][0]["field"], "score");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attendance_checkbox(pool: PgPool) {
    let school = school(&pool).await;
    let teacher = bearer("teacher_5", Role::Teacher);

    let (status, body) = send(
        &pool,
        form_request(
            "POST",
            "/list/attendance",
            &teacher,
            &format!(
                "date=2024-10-07&present=on&student_id={}&lesson_id={}",
                school.student_id, school.lesson_id
            ),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["present"], true);
    let id = body["data"]["id"].as_i64().unwrap();

    // An unchecked box is simply missing from the submission
    let (status, body) = send(
        &pool,
        form_request(
            "PUT",
            &format!("/list/attendance/{}", id),
            &teacher,
            &format!("date=2024-10-07&student_id={}&lesson_id={}", school.student_id, school.lesson_id),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["present"], false);

    let (status, body) = send(&pool, get_request(&format!("/list/attendance/{}", id), Some(&teacher))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["present"], false);
    assert_eq!(body["date"], "2024-10-07T00:00:00Z");

    let (status, _) = send(&pool, delete_request(&format!("/list/attendance/{}", id), &teacher)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&pool, delete_request(&format!("/list/attendance/{}", id), &teacher)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_announcement_lifecycle(pool: PgPool) {
    let school = school(&pool).await;
    let admin = bearer("admin_1", Role::Admin);

    let (status, body) = send(
        &pool,
        json_request(
            "POST",
            "/list/announcements",
            Some(&admin),
            json!({
                "title": "Field trip",
                "description": "Bring a packed lunch",
                "date": "2024-10-20T08:30:00Z",
                "class_id": school.class_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &pool,
        get_request(&format!("/list/announcements/{}", id), Some(&bearer("student_5", Role::Student))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Field trip");
    assert_eq!(body["class_id"], school.class_id);

    // Clearing the class makes it school-wide
    let (status, body) = send(
        &pool,
        json_request(
            "PUT",
            &format!("/list/announcements/{}", id),
            Some(&admin),
            json!({
                "title": "Field trip",
                "description": "Bring a packed lunch and a coat",
                "date": "2024-10-20T08:30:00Z",
                "class_id": ""
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["class_id"], serde_json::Value::Null);

    let (status, _) = send(&pool, delete_request(&format!("/list/announcements/{}", id), &admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&pool, get_request(&format!("/list/announcements/{}", id), Some(&admin))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
