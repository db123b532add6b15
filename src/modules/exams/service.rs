use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{Exam, ExamForm, LessonWorkFilter};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::listing::ListQuery;

const EXAM_LIST: ListQuery = ListQuery {
    select: "SELECT e.id, e.title, e.start_time, e.end_time, e.lesson_id",
    from: "FROM exams e JOIN lessons l ON l.id = e.lesson_id",
    search: &["e.title", "l.name"],
    sortable: &[("title", "e.title"), ("start_time", "e.start_time")],
    default_sort: "e.start_time",
    tiebreak: "e.id",
};

/// Lesson-based filters shared with the assignment list. Expects the lesson
/// joined as `l` and the coursework row's lesson column as `lesson_column`.
pub fn push_lesson_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &LessonWorkFilter, lesson_column: &str) {
    if let Some(lesson_id) = filter.lesson_id {
        query.push(format!(" AND {} = ", lesson_column)).push_bind(lesson_id);
    }
    if let Some(class_id) = filter.class_id {
        query.push(" AND l.class_id = ").push_bind(class_id);
    }
    if let Some(teacher_id) = &filter.teacher_id {
        query.push(" AND l.teacher_id = ").push_bind(teacher_id.clone());
    }
}

pub struct ExamService;

impl ExamService {
    #[instrument(skip(db, form), fields(title = %form.title))]
    pub async fn create_exam(db: &PgPool, form: ExamForm) -> Result<Exam, ActionError> {
        form.validate()?;

        let exam = sqlx::query_as::<_, Exam>(
            "INSERT INTO exams (title, start_time, end_time, lesson_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, title, start_time, end_time, lesson_id",
        )
        .bind(&form.title)
        .bind(form.start_time)
        .bind(form.end_time)
        .bind(form.lesson_id)
        .fetch_one(db)
        .await?;

        info!(id = exam.id, "Exam created");
        Ok(exam)
    }

    #[instrument(skip(db))]
    pub async fn get_exam(db: &PgPool, id: i32) -> Result<Exam, ActionError> {
        sqlx::query_as::<_, Exam>("SELECT id, title, start_time, end_time, lesson_id FROM exams WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| ActionError::not_found("exam", id))
    }

    #[instrument(skip(db))]
    pub async fn list_exams(
        db: &PgPool,
        params: &ListParams,
        filter: &LessonWorkFilter,
    ) -> Result<Paginated<Exam>, ActionError> {
        let page = EXAM_LIST
            .fetch(db, params, |query| push_lesson_filters(query, filter, "e.lesson_id"))
            .await?;
        Ok(page)
    }

    #[instrument(skip(db, form))]
    pub async fn update_exam(db: &PgPool, id: i32, form: ExamForm) -> Result<Exam, ActionError> {
        form.validate()?;

        let exam = sqlx::query_as::<_, Exam>(
            "UPDATE exams
             SET title = $2, start_time = $3, end_time = $4, lesson_id = $5
             WHERE id = $1
             RETURNING id, title, start_time, end_time, lesson_id",
        )
        .bind(id)
        .bind(&form.title)
        .bind(form.start_time)
        .bind(form.end_time)
        .bind(form.lesson_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("exam", id))?;

        info!(id, "Exam updated");
        Ok(exam)
    }

    #[instrument(skip(db))]
    pub async fn delete_exam(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("exam", id));
        }

        info!(id, "Exam deleted");
        Ok(())
    }
}
