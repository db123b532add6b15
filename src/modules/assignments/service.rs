use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{Assignment, AssignmentForm, LessonWorkFilter};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::exams::service::push_lesson_filters;
use crate::modules::listing::ListQuery;

const ASSIGNMENT_LIST: ListQuery = ListQuery {
    select: "SELECT a.id, a.title, a.start_date, a.due_date, a.lesson_id",
    from: "FROM assignments a JOIN lessons l ON l.id = a.lesson_id",
    search: &["a.title", "l.name"],
    sortable: &[
        ("title", "a.title"),
        ("start_date", "a.start_date"),
        ("due_date", "a.due_date"),
    ],
    default_sort: "a.due_date",
    tiebreak: "a.id",
};

pub struct AssignmentService;

impl AssignmentService {
    #[instrument(skip(db, form), fields(title = %form.title))]
    pub async fn create_assignment(db: &PgPool, form: AssignmentForm) -> Result<Assignment, ActionError> {
        form.validate()?;

        let assignment = sqlx::query_as::<_, Assignment>(
            "INSERT INTO assignments (title, start_date, due_date, lesson_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, title, start_date, due_date, lesson_id",
        )
        .bind(&form.title)
        .bind(form.start_date)
        .bind(form.due_date)
        .bind(form.lesson_id)
        .fetch_one(db)
        .await?;

        info!(id = assignment.id, "Assignment created");
        Ok(assignment)
    }

    #[instrument(skip(db))]
    pub async fn get_assignment(db: &PgPool, id: i32) -> Result<Assignment, ActionError> {
        sqlx::query_as::<_, Assignment>(
            "SELECT id, title, start_date, due_date, lesson_id FROM assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("assignment", id))
    }

    #[instrument(skip(db))]
    pub async fn list_assignments(
        db: &PgPool,
        params: &ListParams,
        filter: &LessonWorkFilter,
    ) -> Result<Paginated<Assignment>, ActionError> {
        let page = ASSIGNMENT_LIST
            .fetch(db, params, |query| push_lesson_filters(query, filter, "a.lesson_id"))
            .await?;
        Ok(page)
    }

    #[instrument(skip(db, form))]
    pub async fn update_assignment(
        db: &PgPool,
        id: i32,
        form: AssignmentForm,
    ) -> Result<Assignment, ActionError> {
        form.validate()?;

        let assignment = sqlx::query_as::<_, Assignment>(
            "UPDATE assignments
             SET title = $2, start_date = $3, due_date = $4, lesson_id = $5
             WHERE id = $1
             RETURNING id, title, start_date, due_date, lesson_id",
        )
        .bind(id)
        .bind(&form.title)
        .bind(form.start_date)
        .bind(form.due_date)
        .bind(form.lesson_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("assignment", id))?;

        info!(id, "Assignment updated");
        Ok(assignment)
    }

    #[instrument(skip(db))]
    pub async fn delete_assignment(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("assignment", id));
        }

        info!(id, "Assignment deleted");
        Ok(())
    }
}
