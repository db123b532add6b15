use schoolboard_core::{ActionError, ListParams, Paginated, Role};
use schoolboard_identity::{IdentityProvider, provision_account, retire_account, sync_account};
use schoolboard_models::{Parent, ParentDetail, ParentForm};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

use crate::modules::accounts::{account_changes, new_account};
use crate::modules::listing::ListQuery;

const PARENT_COLUMNS: &str = "id, username, name, surname, email, phone, address, created_at";

const PARENT_LIST: ListQuery = ListQuery {
    select: "SELECT p.*",
    from: "FROM parents p",
    search: &["p.name", "p.surname", "p.username", "p.phone"],
    sortable: &[
        ("name", "p.name"),
        ("surname", "p.surname"),
        ("username", "p.username"),
        ("created_at", "p.created_at"),
    ],
    default_sort: "p.created_at",
    tiebreak: "p.id",
};

pub struct ParentService;

impl ParentService {
    #[instrument(skip(db, identity, form), fields(username = %form.username))]
    pub async fn create_parent<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        form: ParentForm,
    ) -> Result<ParentDetail, ActionError> {
        form.validate()?;
        let account = new_account(
            Role::Parent,
            &form.username,
            form.password.as_deref(),
            &form.name,
            &form.surname,
        )?;

        let form = &form;
        let parent = provision_account(identity, account, |id| async move {
            let parent = sqlx::query_as::<_, Parent>(&format!(
                "INSERT INTO parents (id, username, name, surname, email, phone, address)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING {}",
                PARENT_COLUMNS
            ))
            .bind(&id)
            .bind(&form.username)
            .bind(&form.name)
            .bind(&form.surname)
            .bind(&form.email)
            .bind(&form.phone)
            .bind(&form.address)
            .fetch_one(db)
            .await?;
            Ok::<_, ActionError>(parent)
        })
        .await?;

        info!(id = %parent.id, "Parent created");
        Ok(ParentDetail {
            parent,
            student_ids: Vec::new(),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_parent(db: &PgPool, id: &str) -> Result<ParentDetail, ActionError> {
        let parent = sqlx::query_as::<_, Parent>(&format!("SELECT {} FROM parents WHERE id = $1", PARENT_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| ActionError::not_found("parent", id))?;

        Self::with_students(db, parent).await
    }

    #[instrument(skip(db))]
    pub async fn list_parents(db: &PgPool, params: &ListParams) -> Result<Paginated<Parent>, ActionError> {
        let page = PARENT_LIST.fetch(db, params, |_| {}).await?;
        Ok(page)
    }

    #[instrument(skip(db, identity, form))]
    pub async fn update_parent<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        id: &str,
        form: ParentForm,
    ) -> Result<ParentDetail, ActionError> {
        form.validate()?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM parents WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
        if !exists {
            return Err(ActionError::not_found("parent", id));
        }

        let changes = account_changes(&form.username, form.password.as_deref(), &form.name, &form.surname);
        sync_account(identity, id, &changes).await?;

        let parent = sqlx::query_as::<_, Parent>(&format!(
            "UPDATE parents
             SET username = $2, name = $3, surname = $4, email = $5, phone = $6, address = $7
             WHERE id = $1
             RETURNING {}",
            PARENT_COLUMNS
        ))
        .bind(id)
        .bind(&form.username)
        .bind(&form.name)
        .bind(&form.surname)
        .bind(&form.email)
        .bind(&form.phone)
        .bind(&form.address)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ActionError::not_found("parent", id))?;

        info!(id, "Parent updated");
        Self::with_students(db, parent).await
    }

    /// Parents with students cannot be deleted; the row delete fails on the
    /// foreign key after the identity account is gone.
    #[instrument(skip(db, identity))]
    pub async fn delete_parent<P: IdentityProvider>(
        db: &PgPool,
        identity: &P,
        id: &str,
    ) -> Result<(), ActionError> {
        retire_account(identity, id).await?;

        let result = sqlx::query("DELETE FROM parents WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ActionError::not_found("parent", id));
        }

        info!(id, "Parent deleted");
        Ok(())
    }

    async fn with_students(db: &PgPool, parent: Parent) -> Result<ParentDetail, ActionError> {
        let student_ids: Vec<String> =
            sqlx::query_scalar("SELECT id FROM students WHERE parent_id = $1 ORDER BY id")
                .bind(&parent.id)
                .fetch_all(db)
                .await?;

        Ok(ParentDetail { parent, student_ids })
    }
}
