use std::future::Future;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use schoolboard_core::Role;

use crate::error::IdentityError;

/// Account to create at the identity provider.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Profile changes pushed on update. `password = None` keeps the current one.
#[derive(Debug, Clone)]
pub struct AccountChanges {
    pub username: String,
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

/// An account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
}

/// External user directory keyed by provider-issued ids.
///
/// `NotFound` is reported as [`IdentityError::NotFound`] so callers can
/// classify it with [`crate::tolerate_absent`].
pub trait IdentityProvider: Send + Sync {
    fn create_account(
        &self,
        account: &NewAccount,
    ) -> impl Future<Output = Result<Account, IdentityError>> + Send;

    fn update_account(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> impl Future<Output = Result<Account, IdentityError>> + Send;

    fn delete_account(&self, id: &str) -> impl Future<Output = Result<(), IdentityError>> + Send;

    fn get_account(&self, id: &str) -> impl Future<Output = Result<Account, IdentityError>> + Send;
}
