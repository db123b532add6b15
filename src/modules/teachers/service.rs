use schoolboard_core::{ActionError, ListParams, Paginated, Role};
use schoolboard_identity::{IdentityProvider, provision_account, retire_account, sync_account};
use schoolboard_models::{Teacher, TeacherDetail, TeacherFilter, TeacherForm};
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::accounts::{account_changes, new_account};
use crate::modules::listing::ListQuery;

const TEACHER_COLUMNS: &str = "id, username, name, surname, email, phone, address, img, blood_type, sex, birthday, created_at";

const TEACHER_LIST: ListQuery = ListQuery {
    select: "SELECT t.*",
    from: "FROM teachers t",
    search: &["t.name", "t.surname", "t.username"],
    sortable: &[
        ("name", "t.name"),
        ("surname", "t.surname"),
        ("username", "t.username"),
        ("created_at", "t.created_at"),
    ],
    default_sort: "t.created_at",
    tiebreak: "t.id",
};

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, identity, form), fields(username = %form.username))]
    pub async fn create_teacher<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        form: TeacherForm,
    ) -> Result<TeacherDetail, ActionError> {
        form.validate()?;
        let account = new_account(
            Role::Teacher,
            &form.username,
            form.password.as_deref(),
            &form.name,
            &form.surname,
        )?;

        let form = &form;
        let detail = provision_account(identity, account, |id| async move {
            let mut tx = db.begin().await?;
            let teacher = sqlx::query_as::<_, Teacher>(&format!(
                "INSERT INTO teachers (id, username, name, surname, email, phone, address, img, blood_type, sex, birthday)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                 RETURNING {}",
                TEACHER_COLUMNS
            ))
            .bind(&id)
            .bind(&form.username)
            .bind(&form.name)
            .bind(&form.surname)
            .bind(&form.email)
            .bind(&form.phone)
            .bind(&form.address)
            .bind(&form.img)
            .bind(form.blood_type)
            .bind(form.sex)
            .bind(form.birthday)
            .fetch_one(&mut *tx)
            .await?;

            Self::replace_links(&mut tx, &id, &form.subjects, &form.classes).await?;
            let detail = Self::with_links(&mut tx, teacher).await?;
            tx.commit().await?;
            Ok::<_, ActionError>(detail)
        })
        .await?;

        info!(id = %detail.teacher.id, "Teacher created");
        Ok(detail)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher(db: &PgPool, id: &str) -> Result<TeacherDetail, ActionError> {
        let mut conn = db.acquire().await?;
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teachers WHERE id = $1",
            TEACHER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| ActionError::not_found("teacher", id))?;

        Self::with_links(&mut conn, teacher).await
    }

    #[instrument(skip(db))]
    pub async fn list_teachers(
        db: &PgPool,
        params: &ListParams,
        filter: &TeacherFilter,
    ) -> Result<Paginated<Teacher>, ActionError> {
        let page = TEACHER_LIST
            .fetch(db, params, |query| {
                if let Some(class_id) = filter.class_id {
                    query
                        .push(" AND EXISTS (SELECT 1 FROM lessons l WHERE l.teacher_id = t.id AND l.class_id = ")
                        .push_bind(class_id)
                        .push(")");
                }
                if let Some(subject_id) = filter.subject_id {
                    query
                        .push(" AND EXISTS (SELECT 1 FROM subject_teachers st WHERE st.teacher_id = t.id AND st.subject_id = ")
                        .push_bind(subject_id)
                        .push(")");
                }
            })
            .await?;
        Ok(page)
    }

    /// The profile is pushed to the identity provider before the row is
    /// touched; `subjects` and `classes` replace the previous links.
    #[instrument(skip(db, identity, form))]
    pub async fn update_teacher<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        id: &str,
        form: TeacherForm,
    ) -> Result<TeacherDetail, ActionError> {
        form.validate()?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
        if !exists {
            return Err(ActionError::not_found("teacher", id));
        }

        let changes = account_changes(&form.username, form.password.as_deref(), &form.name, &form.surname);
        sync_account(identity, id, &changes).await?;

        let mut tx = db.begin().await?;
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers
             SET username = $2, name = $3, surname = $4, email = $5, phone = $6, address = $7,
                 img = $8, blood_type = $9, sex = $10, birthday = $11
             WHERE id = $1
             RETURNING {}",
            TEACHER_COLUMNS
        ))
        .bind(id)
        .bind(&form.username)
        .bind(&form.name)
        .bind(&form.surname)
        .bind(&form.email)
        .bind(&form.phone)
        .bind(&form.address)
        .bind(&form.img)
        .bind(form.blood_type)
        .bind(form.sex)
        .bind(form.birthday)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ActionError::not_found("teacher", id))?;

        Self::replace_links(&mut tx, id, &form.subjects, &form.classes).await?;
        let detail = Self::with_links(&mut tx, teacher).await?;
        tx.commit().await?;

        info!(id, "Teacher updated");
        Ok(detail)
    }

    /// Removes the identity account, then the row. Lessons or supervised
    /// classes still pointing at the teacher make the row delete fail.
    #[instrument(skip(db, identity))]
    pub async fn delete_teacher<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        id: &str,
    ) -> Result<(), ActionError> {
        retire_account(identity, id).await?;

        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("teacher", id));
        }

        info!(id, "Teacher deleted");
        Ok(())
    }

    /// Makes the teacher's subjects and supervised classes exactly the
    /// given sets.
    async fn replace_links(
        conn: &mut PgConnection,
        teacher_id: &str,
        subjects: &[i32],
        classes: &[i32],
    ) -> Result<(), ActionError> {
        sqlx::query("DELETE FROM subject_teachers WHERE teacher_id = $1")
            .bind(teacher_id)
            .execute(&mut *conn)
            .await?;
        sqlx::query(
            "INSERT INTO subject_teachers (subject_id, teacher_id)
             SELECT DISTINCT UNNEST($1::int4[]), $2::text
             ON CONFLICT DO NOTHING",
        )
        .bind(subjects)
        .bind(teacher_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query("UPDATE classes SET supervisor_id = NULL WHERE supervisor_id = $1 AND NOT (id = ANY($2))")
            .bind(teacher_id)
            .bind(classes)
            .execute(&mut *conn)
            .await?;
        let supervised = sqlx::query("UPDATE classes SET supervisor_id = $1 WHERE id = ANY($2)")
            .bind(teacher_id)
            .bind(classes)
            .execute(&mut *conn)
            .await?;

        let mut wanted = classes.to_vec();
        wanted.sort_unstable();
        wanted.dedup();
        if supervised.rows_affected() < wanted.len() as u64 {
            return Err(ActionError::invalid("classes", "One or more classes do not exist"));
        }

        Ok(())
    }

    async fn with_links(conn: &mut PgConnection, teacher: Teacher) -> Result<TeacherDetail, ActionError> {
        let subject_ids: Vec<i32> = sqlx::query_scalar(
            "SELECT subject_id FROM subject_teachers WHERE teacher_id = $1 ORDER BY subject_id",
        )
        .bind(&teacher.id)
        .fetch_all(&mut *conn)
        .await?;
        let class_ids: Vec<i32> =
            sqlx::query_scalar("SELECT id FROM classes WHERE supervisor_id = $1 ORDER BY id")
                .bind(&teacher.id)
                .fetch_all(&mut *conn)
                .await?;

        Ok(TeacherDetail {
            teacher,
            subject_ids,
            class_ids,
        })
    }
}
