use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{Subject, SubjectDetail, SubjectFilter, SubjectForm};
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::listing::ListQuery;

const SUBJECT_LIST: ListQuery = ListQuery {
    select: "SELECT s.id, s.name",
    from: "FROM subjects s",
    search: &["s.name"],
    sortable: &[("name", "s.name"), ("id", "s.id")],
    default_sort: "s.name",
    tiebreak: "s.id",
};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, form), fields(name = %form.name))]
    pub async fn create_subject(db: &PgPool, form: SubjectForm) -> Result<SubjectDetail, ActionError> {
        form.validate()?;

        let mut tx = db.begin().await?;
        let subject = sqlx::query_as::<_, Subject>("INSERT INTO subjects (name) VALUES ($1) RETURNING id, name")
            .bind(&form.name)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_teachers(&mut tx, subject.id, &form.teachers).await?;
        let detail = Self::with_teachers(&mut tx, subject).await?;
        tx.commit().await?;

        info!(id = detail.subject.id, "Subject created");
        Ok(detail)
    }

    #[instrument(skip(db))]
    pub async fn get_subject(db: &PgPool, id: i32) -> Result<SubjectDetail, ActionError> {
        let mut conn = db.acquire().await?;
        let subject = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| ActionError::not_found("subject", id))?;

        Self::with_teachers(&mut conn, subject).await
    }

    #[instrument(skip(db))]
    pub async fn list_subjects(
        db: &PgPool,
        params: &ListParams,
        filter: &SubjectFilter,
    ) -> Result<Paginated<Subject>, ActionError> {
        let page = SUBJECT_LIST
            .fetch(db, params, |query| {
                if let Some(teacher_id) = &filter.teacher_id {
                    query
                        .push(" AND EXISTS (SELECT 1 FROM subject_teachers st WHERE st.subject_id = s.id AND st.teacher_id = ")
                        .push_bind(teacher_id.clone())
                        .push(")");
                }
            })
            .await?;
        Ok(page)
    }

    /// `teachers` becomes the subject's complete teacher set.
    #[instrument(skip(db, form))]
    pub async fn update_subject(db: &PgPool, id: i32, form: SubjectForm) -> Result<SubjectDetail, ActionError> {
        form.validate()?;

        let mut tx = db.begin().await?;
        let subject = sqlx::query_as::<_, Subject>("UPDATE subjects SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(id)
            .bind(&form.name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ActionError::not_found("subject", id))?;

        Self::replace_teachers(&mut tx, id, &form.teachers).await?;
        let detail = Self::with_teachers(&mut tx, subject).await?;
        tx.commit().await?;

        info!(id, "Subject updated");
        Ok(detail)
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("subject", id));
        }

        info!(id, "Subject deleted");
        Ok(())
    }

    async fn replace_teachers(conn: &mut PgConnection, subject_id: i32, teachers: &[String]) -> Result<(), ActionError> {
        sqlx::query("DELETE FROM subject_teachers WHERE subject_id = $1")
            .bind(subject_id)
            .execute(&mut *conn)
            .await?;
        sqlx::query(
            "INSERT INTO subject_teachers (subject_id, teacher_id)
             SELECT $1, teacher_id FROM UNNEST($2::text[]) AS t (teacher_id)
             ON CONFLICT DO NOTHING",
        )
        .bind(subject_id)
        .bind(teachers)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn with_teachers(conn: &mut PgConnection, subject: Subject) -> Result<SubjectDetail, ActionError> {
        let teacher_ids: Vec<String> = sqlx::query_scalar(
            "SELECT teacher_id FROM subject_teachers WHERE subject_id = $1 ORDER BY teacher_id",
        )
        .bind(subject.id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(SubjectDetail { subject, teacher_ids })
    }
}
