use schoolboard_core::{ActionError, ListParams, Paginated, Role};
use schoolboard_identity::{IdentityProvider, provision_account, retire_account, sync_account};
use schoolboard_models::{Student, StudentFilter, StudentForm};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::modules::accounts::{account_changes, new_account};
use crate::modules::listing::ListQuery;

const STUDENT_COLUMNS: &str = "id, username, name, surname, email, phone, address, img, blood_type, sex, birthday, parent_id, class_id, grade_id, created_at";

const STUDENT_LIST: ListQuery = ListQuery {
    select: "SELECT s.*",
    from: "FROM students s",
    search: &["s.name", "s.surname", "s.username"],
    sortable: &[
        ("name", "s.name"),
        ("surname", "s.surname"),
        ("username", "s.username"),
        ("class_id", "s.class_id"),
        ("grade_id", "s.grade_id"),
        ("created_at", "s.created_at"),
    ],
    default_sort: "s.created_at",
    tiebreak: "s.id",
};

#[derive(sqlx::FromRow)]
struct Enrolment {
    capacity: i32,
    student_count: i64,
}

pub struct StudentService;

impl StudentService {
    /// Fails with `CapacityExceeded` before any account is created when the
    /// class already holds `capacity` students.
    #[instrument(skip(db, identity, form), fields(username = %form.username, class_id = form.class_id))]
    pub async fn create_student<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        form: StudentForm,
    ) -> Result<Student, ActionError> {
        form.validate()?;
        let account = new_account(
            Role::Student,
            &form.username,
            form.password.as_deref(),
            &form.name,
            &form.surname,
        )?;

        Self::check_capacity(db, form.class_id).await?;

        let form = &form;
        let student = provision_account(identity, account, |id| async move {
            let student = sqlx::query_as::<_, Student>(&format!(
                "INSERT INTO students (id, username, name, surname, email, phone, address, img,
                                       blood_type, sex, birthday, parent_id, class_id, grade_id)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                 RETURNING {}",
                STUDENT_COLUMNS
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
            .bind(&form.parent_id)
            .bind(form.class_id)
            .bind(form.grade_id)
            .fetch_one(db)
            .await?;
            Ok::<_, ActionError>(student)
        })
        .await?;

        info!(id = %student.id, "Student created");
        Ok(student)
    }

    async fn check_capacity(db: &PgPool, class_id: i32) -> Result<(), ActionError> {
        let enrolment = sqlx::query_as::<_, Enrolment>(
            "SELECT c.capacity, (SELECT COUNT(*) FROM students s WHERE s.class_id = c.id) AS student_count
             FROM classes c
             WHERE c.id = $1",
        )
        .bind(class_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::invalid("class_id", "Class does not exist"))?;

        if enrolment.student_count >= i64::from(enrolment.capacity) {
            warn!(class_id, capacity = enrolment.capacity, "Class is full");
            return Err(ActionError::CapacityExceeded {
                class_id,
                capacity: enrolment.capacity,
            });
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: &str) -> Result<Student, ActionError> {
        sqlx::query_as::<_, Student>(&format!("SELECT {} FROM students WHERE id = $1", STUDENT_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| ActionError::not_found("student", id))
    }

    #[instrument(skip(db))]
    pub async fn list_students(
        db: &PgPool,
        params: &ListParams,
        filter: &StudentFilter,
    ) -> Result<Paginated<Student>, ActionError> {
        let page = STUDENT_LIST
            .fetch(db, params, |query| {
                if let Some(class_id) = filter.class_id {
                    query.push(" AND s.class_id = ").push_bind(class_id);
                }
                if let Some(grade_id) = filter.grade_id {
                    query.push(" AND s.grade_id = ").push_bind(grade_id);
                }
                if let Some(parent_id) = &filter.parent_id {
                    query.push(" AND s.parent_id = ").push_bind(parent_id.clone());
                }
                if let Some(teacher_id) = &filter.teacher_id {
                    query
                        .push(" AND s.class_id IN (SELECT l.class_id FROM lessons l WHERE l.teacher_id = ")
                        .push_bind(teacher_id.clone())
                        .push(")");
                }
            })
            .await?;
        Ok(page)
    }

    /// Moving a student to another class does not re-check capacity.
    #[instrument(skip(db, identity, form))]
    pub async fn update_student<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        id: &str,
        form: StudentForm,
    ) -> Result<Student, ActionError> {
        form.validate()?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
        if !exists {
            return Err(ActionError::not_found("student", id));
        }

        let changes = account_changes(&form.username, form.password.as_deref(), &form.name, &form.surname);
        sync_account(identity, id, &changes).await?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET username = $2, name = $3, surname = $4, email = $5, phone = $6, address = $7, img = $8,
                 blood_type = $9, sex = $10, birthday = $11, parent_id = $12, class_id = $13, grade_id = $14
             WHERE id = $1
             RETURNING {}",
            STUDENT_COLUMNS
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
        .bind(&form.parent_id)
        .bind(form.class_id)
        .bind(form.grade_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("student", id))?;

        info!(id, "Student updated");
        Ok(student)
    }

    #[instrument(skip(db, identity))]
    pub async fn delete_student<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        id: &str,
    ) -> Result<(), ActionError> {
        retire_account(identity, id).await?;

        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("student", id));
        }

        info!(id, "Student deleted");
        Ok(())
    }
}
