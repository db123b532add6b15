use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{Attendance, AttendanceFilter, AttendanceForm};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::listing::ListQuery;

const ATTENDANCE_LIST: ListQuery = ListQuery {
    select: "SELECT a.id, a.date, a.present, a.student_id, a.lesson_id",
    from: "FROM attendances a JOIN students s ON s.id = a.student_id",
    search: &["s.name", "s.surname"],
    sortable: &[("date", "a.date"), ("present", "a.present")],
    default_sort: "a.date",
    tiebreak: "a.id",
};

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(db, form), fields(student_id = %form.student_id, lesson_id = form.lesson_id))]
    pub async fn create_attendance(db: &PgPool, form: AttendanceForm) -> Result<Attendance, ActionError> {
        form.validate()?;

        let attendance = sqlx::query_as::<_, Attendance>(
            "INSERT INTO attendances (date, present, student_id, lesson_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, date, present, student_id, lesson_id",
        )
        .bind(form.date)
        .bind(form.present)
        .bind(&form.student_id)
        .bind(form.lesson_id)
        .fetch_one(db)
        .await?;

        info!(id = attendance.id, "Attendance recorded");
        Ok(attendance)
    }

    #[instrument(skip(db))]
    pub async fn get_attendance(db: &PgPool, id: i32) -> Result<Attendance, ActionError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT id, date, present, student_id, lesson_id FROM attendances WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("attendance", id))
    }

    #[instrument(skip(db))]
    pub async fn list_attendance(
        db: &PgPool,
        params: &ListParams,
        filter: &AttendanceFilter,
    ) -> Result<Paginated<Attendance>, ActionError> {
        let page = ATTENDANCE_LIST
            .fetch(db, params, |query| {
                if let Some(student_id) = &filter.student_id {
                    query.push(" AND a.student_id = ").push_bind(student_id.clone());
                }
                if let Some(lesson_id) = filter.lesson_id {
                    query.push(" AND a.lesson_id = ").push_bind(lesson_id);
                }
            })
            .await?;
        Ok(page)
    }

    #[instrument(skip(db, form))]
    pub async fn update_attendance(
        db: &PgPool,
        id: i32,
        form: AttendanceForm,
    ) -> Result<Attendance, ActionError> {
        form.validate()?;

        let attendance = sqlx::query_as::<_, Attendance>(
            "UPDATE attendances
             SET date = $2, present = $3, student_id = $4, lesson_id = $5
             WHERE id = $1
             RETURNING id, date, present, student_id, lesson_id",
        )
        .bind(id)
        .bind(form.date)
        .bind(form.present)
        .bind(&form.student_id)
        .bind(form.lesson_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("attendance", id))?;

        info!(id, "Attendance updated");
        Ok(attendance)
    }

    #[instrument(skip(db))]
    pub async fn delete_attendance(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("attendance", id));
        }

        info!(id, "Attendance deleted");
        Ok(())
    }
}
