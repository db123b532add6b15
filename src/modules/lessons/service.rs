use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{Lesson, LessonFilter, LessonForm};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::listing::ListQuery;

const LESSON_COLUMNS: &str = "id, name, day, start_time, end_time, subject_id, class_id, teacher_id";

const LESSON_LIST: ListQuery = ListQuery {
    select: "SELECT l.id, l.name, l.day, l.start_time, l.end_time, l.subject_id, l.class_id, l.teacher_id",
    from: "FROM lessons l",
    search: &["l.name"],
    sortable: &[
        ("name", "l.name"),
        ("day", "l.day"),
        ("start_time", "l.start_time"),
    ],
    default_sort: "l.start_time",
    tiebreak: "l.id",
};

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db, form), fields(name = %form.name))]
    pub async fn create_lesson(db: &PgPool, form: LessonForm) -> Result<Lesson, ActionError> {
        form.validate()?;

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO lessons (name, day, start_time, end_time, subject_id, class_id, teacher_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            LESSON_COLUMNS
        ))
        .bind(&form.name)
        .bind(form.day)
        .bind(form.start_time)
        .bind(form.end_time)
        .bind(form.subject_id)
        .bind(form.class_id)
        .bind(&form.teacher_id)
        .fetch_one(db)
        .await?;

        info!(id = lesson.id, "Lesson created");
        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn get_lesson(db: &PgPool, id: i32) -> Result<Lesson, ActionError> {
        sqlx::query_as::<_, Lesson>(&format!("SELECT {} FROM lessons WHERE id = $1", LESSON_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| ActionError::not_found("lesson", id))
    }

    #[instrument(skip(db))]
    pub async fn list_lessons(
        db: &PgPool,
        params: &ListParams,
        filter: &LessonFilter,
    ) -> Result<Paginated<Lesson>, ActionError> {
        let page = LESSON_LIST
            .fetch(db, params, |query| {
                if let Some(class_id) = filter.class_id {
                    query.push(" AND l.class_id = ").push_bind(class_id);
                }
                if let Some(teacher_id) = &filter.teacher_id {
                    query.push(" AND l.teacher_id = ").push_bind(teacher_id.clone());
                }
            })
            .await?;
        Ok(page)
    }

    #[instrument(skip(db, form))]
    pub async fn update_lesson(db: &PgPool, id: i32, form: LessonForm) -> Result<Lesson, ActionError> {
        form.validate()?;

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "UPDATE lessons
             SET name = $2, day = $3, start_time = $4, end_time = $5, subject_id = $6, class_id = $7, teacher_id = $8
             WHERE id = $1
             RETURNING {}",
            LESSON_COLUMNS
        ))
        .bind(id)
        .bind(&form.name)
        .bind(form.day)
        .bind(form.start_time)
        .bind(form.end_time)
        .bind(form.subject_id)
        .bind(form.class_id)
        .bind(&form.teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("lesson", id))?;

        info!(id, "Lesson updated");
        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn delete_lesson(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("lesson", id));
        }

        info!(id, "Lesson deleted");
        Ok(())
    }
}
