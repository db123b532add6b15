//! Administrator provisioning.
//!
//! Admins have no create action in the API; the first one is made here.
//! The identity account carries the `admin` role and the row is keyed by
//! the provider-issued id. A failed insert removes the account again.

use schoolboard_core::{ActionError, Role};
use schoolboard_identity::{IdentityProvider, NewAccount, provision_account};
use schoolboard_models::Admin;
use sqlx::PgPool;
use tracing::info;

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewAdmin {
    fn check(&self) -> Result<(), ActionError> {
        let length = self.username.chars().count();
        if !(3..=20).contains(&length) {
            return Err(ActionError::invalid(
                "username",
                "Username must be between 3 and 20 characters long",
            ));
        }
        if self.password.chars().count() < 8 {
            return Err(ActionError::invalid(
                "password",
                "Password must be at least 8 characters long",
            ));
        }
        Ok(())
    }
}

pub async fn create_admin<P: IdentityProvider>(
    db: &PgPool,
    identity: &P,
    admin: NewAdmin,
) -> Result<Admin, ActionError> {
    admin.check()?;

    let account = NewAccount {
        username: admin.username.clone(),
        password: admin.password,
        first_name: admin.first_name,
        last_name: admin.last_name,
        role: Role::Admin,
    };

    let username = admin.username;
    let created = provision_account(identity, account, |id| async move {
        let row = sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (id, username) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(&id)
        .bind(&username)
        .fetch_one(db)
        .await?;
        Ok::<_, ActionError>(row)
    })
    .await?;

    info!(id = %created.id, username = %created.username, "Admin created");
    Ok(created)
}
