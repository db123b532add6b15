//! Keeps user-bearing rows and provider accounts in step.
//!
//! Create provisions the account first and removes it again if the row
//! cannot be written. Update and delete tolerate an account that is
//! already gone; any other provider failure aborts the action before the
//! database is touched.

use std::future::Future;

use metrics::counter;
use schoolboard_core::ActionError;
use tracing::{error, info, instrument, warn};

use crate::error::tolerate_absent;
use crate::provider::{Account, AccountChanges, IdentityProvider, NewAccount};

fn record(op: &'static str, outcome: &'static str) {
    counter!("identity_mirror_total", "op" => op, "outcome" => outcome).increment(1);
}

/// Creates the provider account, then runs `persist` with its id.
///
/// When `persist` fails the account is deleted so no orphan is left
/// behind. A failed cleanup is logged with the orphaned id and the
/// original error is still returned.
#[instrument(skip(provider, account, persist), fields(username = %account.username, role = %account.role))]
pub async fn provision_account<P, T, F, Fut>(
    provider: &P,
    account: NewAccount,
    persist: F,
) -> Result<T, ActionError>
where
    P: IdentityProvider,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, ActionError>>,
{
    let created = match provider.create_account(&account).await {
        Ok(created) => created,
        Err(err) => {
            record("create", "failed");
            return Err(err.into());
        }
    };

    match persist(created.id.clone()).await {
        Ok(value) => {
            record("create", "ok");
            Ok(value)
        }
        Err(err) => {
            match tolerate_absent(provider.delete_account(&created.id).await) {
                Ok(_) => {
                    record("create", "compensated");
                    info!(id = %created.id, "Removed identity account after failed insert");
                }
                Err(cleanup) => {
                    record("create", "orphaned");
                    error!(
                        id = %created.id,
                        error = %cleanup,
                        "Orphaned identity account: cleanup after failed insert did not succeed"
                    );
                }
            }
            Err(err)
        }
    }
}

/// Pushes profile changes; `Ok(None)` when the account no longer exists.
#[instrument(skip(provider, changes))]
pub async fn sync_account<P: IdentityProvider>(
    provider: &P,
    id: &str,
    changes: &AccountChanges,
) -> Result<Option<Account>, ActionError> {
    match tolerate_absent(provider.update_account(id, changes).await) {
        Ok(Some(account)) => {
            record("update", "ok");
            Ok(Some(account))
        }
        Ok(None) => {
            record("update", "absent");
            warn!(id, "Identity account missing on update, continuing");
            Ok(None)
        }
        Err(err) => {
            record("update", "failed");
            Err(err.into())
        }
    }
}

/// Deletes the account; returns whether one was actually removed.
#[instrument(skip(provider))]
pub async fn retire_account<P: IdentityProvider>(provider: &P, id: &str) -> Result<bool, ActionError> {
    match tolerate_absent(provider.delete_account(id).await) {
        Ok(Some(())) => {
            record("delete", "ok");
            Ok(true)
        }
        Ok(None) => {
            record("delete", "absent");
            warn!(id, "Identity account already absent on delete");
            Ok(false)
        }
        Err(err) => {
            record("delete", "failed");
            Err(err.into())
        }
    }
}
