use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{ExamResult, ResultFilter, ResultForm};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::listing::ListQuery;

const RESULT_COLUMNS: &str = "id, score, exam_id, assignment_id, student_id";

const RESULT_LIST: ListQuery = ListQuery {
    select: "SELECT r.id, r.score, r.exam_id, r.assignment_id, r.student_id",
    from: "FROM results r JOIN students s ON s.id = r.student_id",
    search: &["s.name", "s.surname"],
    sortable: &[("score", "r.score"), ("student", "s.surname")],
    default_sort: "r.id",
    tiebreak: "r.id",
};

pub struct ResultService;

impl ResultService {
    #[instrument(skip(db, form), fields(student_id = %form.student_id))]
    pub async fn create_result(db: &PgPool, form: ResultForm) -> Result<ExamResult, ActionError> {
        form.validate()?;

        let result = sqlx::query_as::<_, ExamResult>(&format!(
            "INSERT INTO results (score, exam_id, assignment_id, student_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            RESULT_COLUMNS
        ))
        .bind(form.score)
        .bind(form.exam_id)
        .bind(form.assignment_id)
        .bind(&form.student_id)
        .fetch_one(db)
        .await?;

        info!(id = result.id, "Result recorded");
        Ok(result)
    }

    #[instrument(skip(db))]
    pub async fn get_result(db: &PgPool, id: i32) -> Result<ExamResult, ActionError> {
        sqlx::query_as::<_, ExamResult>(&format!("SELECT {} FROM results WHERE id = $1", RESULT_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| ActionError::not_found("result", id))
    }

    #[instrument(skip(db))]
    pub async fn list_results(
        db: &PgPool,
        params: &ListParams,
        filter: &ResultFilter,
    ) -> Result<Paginated<ExamResult>, ActionError> {
        let page = RESULT_LIST
            .fetch(db, params, |query| {
                if let Some(student_id) = &filter.student_id {
                    query.push(" AND r.student_id = ").push_bind(student_id.clone());
                }
                if let Some(exam_id) = filter.exam_id {
                    query.push(" AND r.exam_id = ").push_bind(exam_id);
                }
                if let Some(assignment_id) = filter.assignment_id {
                    query.push(" AND r.assignment_id = ").push_bind(assignment_id);
                }
            })
            .await?;
        Ok(page)
    }

    #[instrument(skip(db, form))]
    pub async fn update_result(db: &PgPool, id: i32, form: ResultForm) -> Result<ExamResult, ActionError> {
        form.validate()?;

        let result = sqlx::query_as::<_, ExamResult>(&format!(
            "UPDATE results
             SET score = $2, exam_id = $3, assignment_id = $4, student_id = $5
             WHERE id = $1
             RETURNING {}",
            RESULT_COLUMNS
        ))
        .bind(id)
        .bind(form.score)
        .bind(form.exam_id)
        .bind(form.assignment_id)
        .bind(&form.student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("result", id))?;

        info!(id, "Result updated");
        Ok(result)
    }

    #[instrument(skip(db))]
    pub async fn delete_result(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM results WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("result", id));
        }

        info!(id, "Result deleted");
        Ok(())
    }
}
