use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{ClassScopeFilter, Event, EventForm};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::listing::ListQuery;

const EVENT_COLUMNS: &str = "id, title, description, start_time, end_time, class_id";

const EVENT_LIST: ListQuery = ListQuery {
    select: "SELECT e.id, e.title, e.description, e.start_time, e.end_time, e.class_id",
    from: "FROM events e",
    search: &["e.title", "e.description"],
    sortable: &[("title", "e.title"), ("start_time", "e.start_time")],
    default_sort: "e.start_time",
    tiebreak: "e.id",
};

/// School-wide rows (`class_id IS NULL`) always pass a class scope.
pub fn push_class_scope(query: &mut QueryBuilder<'_, Postgres>, filter: &ClassScopeFilter, class_column: &str) {
    if let Some(class_id) = filter.class_id {
        query
            .push(format!(" AND ({0} IS NULL OR {0} = ", class_column))
            .push_bind(class_id)
            .push(")");
    }
    if let Some(student_id) = &filter.student_id {
        query
            .push(format!(
                " AND ({0} IS NULL OR {0} IN (SELECT class_id FROM students WHERE id = ",
                class_column
            ))
            .push_bind(student_id.clone())
            .push("))");
    }
}

pub struct EventService;

impl EventService {
    #[instrument(skip(db, form), fields(title = %form.title))]
    pub async fn create_event(db: &PgPool, form: EventForm) -> Result<Event, ActionError> {
        form.validate()?;

        let event = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (title, description, start_time, end_time, class_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            EVENT_COLUMNS
        ))
        .bind(&form.title)
        .bind(&form.description)
        .bind(form.start_time)
        .bind(form.end_time)
        .bind(form.class_id)
        .fetch_one(db)
        .await?;

        info!(id = event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(db))]
    pub async fn get_event(db: &PgPool, id: i32) -> Result<Event, ActionError> {
        sqlx::query_as::<_, Event>(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| ActionError::not_found("event", id))
    }

    #[instrument(skip(db))]
    pub async fn list_events(
        db: &PgPool,
        params: &ListParams,
        filter: &ClassScopeFilter,
    ) -> Result<Paginated<Event>, ActionError> {
        let page = EVENT_LIST
            .fetch(db, params, |query| push_class_scope(query, filter, "e.class_id"))
            .await?;
        Ok(page)
    }

    #[instrument(skip(db, form))]
    pub async fn update_event(db: &PgPool, id: i32, form: EventForm) -> Result<Event, ActionError> {
        form.validate()?;

        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events
             SET title = $2, description = $3, start_time = $4, end_time = $5, class_id = $6
             WHERE id = $1
             RETURNING {}",
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(&form.title)
        .bind(&form.description)
        .bind(form.start_time)
        .bind(form.end_time)
        .bind(form.class_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("event", id))?;

        info!(id, "Event updated");
        Ok(event)
    }

    #[instrument(skip(db))]
    pub async fn delete_event(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("event", id));
        }

        info!(id, "Event deleted");
        Ok(())
    }
}
