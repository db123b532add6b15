use schoolboard_core::{ActionError, ListParams, Paginated};
use schoolboard_models::{Announcement, AnnouncementForm, ClassScopeFilter};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::events::service::push_class_scope;
use crate::modules::listing::ListQuery;

const ANNOUNCEMENT_LIST: ListQuery = ListQuery {
    select: "SELECT a.id, a.title, a.description, a.date, a.class_id",
    from: "FROM announcements a",
    search: &["a.title", "a.description"],
    sortable: &[("title", "a.title"), ("date", "a.date")],
    default_sort: "a.date",
    tiebreak: "a.id",
};

pub struct AnnouncementService;

impl AnnouncementService {
    #[instrument(skip(db, form), fields(title = %form.title))]
    pub async fn create_announcement(
        db: &PgPool,
        form: AnnouncementForm,
    ) -> Result<Announcement, ActionError> {
        form.validate()?;

        let announcement = sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (title, description, date, class_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, title, description, date, class_id",
        )
        .bind(&form.title)
        .bind(&form.description)
        .bind(form.date)
        .bind(form.class_id)
        .fetch_one(db)
        .await?;

        info!(id = announcement.id, "Announcement created");
        Ok(announcement)
    }

    #[instrument(skip(db))]
    pub async fn get_announcement(db: &PgPool, id: i32) -> Result<Announcement, ActionError> {
        sqlx::query_as::<_, Announcement>(
            "SELECT id, title, description, date, class_id FROM announcements WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("announcement", id))
    }

    #[instrument(skip(db))]
    pub async fn list_announcements(
        db: &PgPool,
        params: &ListParams,
        filter: &ClassScopeFilter,
    ) -> Result<Paginated<Announcement>, ActionError> {
        let page = ANNOUNCEMENT_LIST
            .fetch(db, params, |query| push_class_scope(query, filter, "a.class_id"))
            .await?;
        Ok(page)
    }

    #[instrument(skip(db, form))]
    pub async fn update_announcement(
        db: &PgPool,
        id: i32,
        form: AnnouncementForm,
    ) -> Result<Announcement, ActionError> {
        form.validate()?;

        let announcement = sqlx::query_as::<_, Announcement>(
            "UPDATE announcements
             SET title = $2, description = $3, date = $4, class_id = $5
             WHERE id = $1
             RETURNING id, title, description, date, class_id",
        )
        .bind(id)
        .bind(&form.title)
        .bind(&form.description)
        .bind(form.date)
        .bind(form.class_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("announcement", id))?;

        info!(id, "Announcement updated");
        Ok(announcement)
    }

    #[instrument(skip(db))]
    pub async fn delete_announcement(db: &PgPool, id: i32) -> Result<(), ActionError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("announcement", id));
        }

        info!(id, "Announcement deleted");
        Ok(())
    }
}
