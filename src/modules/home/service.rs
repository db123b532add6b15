use schoolboard_core::{AppError, Role};
use schoolboard_identity::{IdentityClient, IdentityError, IdentityProvider};
use sqlx::PgPool;
use tracing::{instrument, warn};

use crate::middleware::session::Session;
use crate::modules::home::model::{HomeResponse, ProfileResponse, SchoolCounts};

pub struct HomeService;

impl HomeService {
    #[instrument(skip(db))]
    pub async fn home(db: &PgPool, session: &Session) -> Result<HomeResponse, AppError> {
        let counts = match session.role {
            Role::Admin => Some(Self::school_counts(db).await?),
            _ => None,
        };

        Ok(HomeResponse {
            role: session.role,
            user_id: session.user_id.clone(),
            counts,
        })
    }

    pub async fn school_counts(db: &PgPool) -> Result<SchoolCounts, sqlx::Error> {
        sqlx::query_as::<_, SchoolCounts>(
            "SELECT
                (SELECT COUNT(*) FROM admins) AS admins,
                (SELECT COUNT(*) FROM teachers) AS teachers,
                (SELECT COUNT(*) FROM students) AS students,
                (SELECT COUNT(*) FROM parents) AS parents,
                (SELECT COUNT(*) FROM classes) AS classes,
                (SELECT COUNT(*) FROM subjects) AS subjects,
                (SELECT COUNT(*) FROM lessons) AS lessons",
        )
        .fetch_one(db)
        .await
    }

    /// Looks up the caller's account at the identity provider.
    #[instrument(skip(identity))]
    pub async fn profile(identity: &IdentityClient, session: &Session) -> Result<ProfileResponse, AppError> {
        match identity.get_account(&session.user_id).await {
            Ok(account) => Ok(ProfileResponse {
                role: session.role,
                account,
            }),
            Err(IdentityError::NotFound) => Err(AppError::not_found(anyhow::anyhow!(
                "No identity account for this session"
            ))),
            Err(err) => {
                warn!(error = %err, "Profile lookup failed");
                Err(AppError::bad_gateway(err))
            }
        }
    }

    pub async fn database_reachable(db: &PgPool) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(db).await.is_ok()
    }
}
