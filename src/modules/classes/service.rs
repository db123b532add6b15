use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{Class, ClassFilter, ClassForm, ClassWithStats};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::listing::ListQuery;

const CLASS_WITH_STATS: &str = "SELECT c.id, c.name, c.capacity, c.grade_id, c.supervisor_id,
        (SELECT COUNT(*) FROM students s WHERE s.class_id = c.id) AS student_count";

const CLASS_LIST: ListQuery = ListQuery {
    select: CLASS_WITH_STATS,
    from: "FROM classes c",
    search: &["c.name"],
    sortable: &[
        ("name", "c.name"),
        ("capacity", "c.capacity"),
        ("grade_id", "c.grade_id"),
    ],
    default_sort: "c.name",
    tiebreak: "c.id",
};

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db, form), fields(name = %form.name))]
    pub async fn create_class(db: &PgPool, form: ClassForm) -> Result<Class, ActionError> {
        form.validate()?;

        let class = sqlx::query_as::<_, Class>(
            "INSERT INTO classes (name, capacity, grade_id, supervisor_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, capacity, grade_id, supervisor_id",
        )
        .bind(&form.name)
        .bind(form.capacity)
        .bind(form.grade_id)
        .bind(&form.supervisor_id)
        .fetch_one(db)
        .await?;

        info!(id = class.id, "Class created");
        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: i32) -> Result<ClassWithStats, ActionError> {
        sqlx::query_as::<_, ClassWithStats>(&format!("{} FROM classes c WHERE c.id = $1", CLASS_WITH_STATS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| ActionError::not_found("class", id))
    }

    #[instrument(skip(db))]
    pub async fn list_classes(
        db: &PgPool,
        params: &ListParams,
        filter: &ClassFilter,
    ) -> Result<Paginated<ClassWithStats>, ActionError> {
        let page = CLASS_LIST
            .fetch(db, params, |query| {
                if let Some(supervisor_id) = &filter.supervisor_id {
                    query.push(" AND c.supervisor_id = ").push_bind(supervisor_id.clone());
                }
                if let Some(grade_id) = filter.grade_id {
                    query.push(" AND c.grade_id = ").push_bind(grade_id);
                }
            })
            .await?;
        Ok(page)
    }

    /// Capacity may be lowered below the current enrolment; only new
    /// students are refused.
    #[instrument(skip(db, form))]
    pub async fn update_class(db: &PgPool, id: i32, form: ClassForm) -> Result<Class, ActionError> {
        form.validate()?;

        let class = sqlx::query_as::<_, Class>(
            "UPDATE classes
             SET name = $2, capacity = $3, grade_id = $4, supervisor_id = $5
             WHERE id = $1
             RETURNING id, name, capacity, grade_id, supervisor_id",
        )
        .bind(id)
        .bind(&form.name)
        .bind(form.capacity)
        .bind(form.grade_id)
        .bind(&form.supervisor_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("class", id))?;

        info!(id, "Class updated");
        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("class", id));
        }

        info!(id, "Class deleted");
        Ok(())
    }
}
