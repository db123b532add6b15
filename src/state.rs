use schoolboard_config::{AccessConfig, CorsConfig, IdentityConfig, JwtConfig};
use schoolboard_db::init_db_pool;
use schoolboard_identity::{IdentityClient, IdentityError};
use sqlx::PgPool;

/// Handles shared by every request. Both the pool and the identity client
/// are cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub identity: IdentityClient,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub access_config: AccessConfig,
    pub identity_config: IdentityConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("identity provider: {0}")]
    Identity(#[from] IdentityError),
}

pub async fn init_app_state() -> Result<AppState, StartupError> {
    let identity_config = IdentityConfig::from_env();

    Ok(AppState {
        db: init_db_pool().await?,
        identity: IdentityClient::from_config(&identity_config)?,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        access_config: AccessConfig::from_env(),
        identity_config,
    })
}
