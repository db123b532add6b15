//! Process-local identity provider for development and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::IdentityError;
use crate::provider::{Account, AccountChanges, IdentityProvider, NewAccount};

#[derive(Debug, Default)]
struct Directory {
    accounts: HashMap<String, StoredAccount>,
    next_id: u64,
    unavailable: bool,
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password: String,
}

/// Mirrors the hosted provider's observable rules: unique usernames,
/// passwords of at least 8 characters, 404 for unknown ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    directory: Arc<Mutex<Directory>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Directory> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.directory
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn available(directory: &Directory) -> Result<(), IdentityError> {
        if directory.unavailable {
            return Err(IdentityError::Rejected {
                status: 503,
                message: "identity provider unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn check_password(password: &str) -> Result<(), IdentityError> {
        if password.chars().count() < 8 {
            return Err(IdentityError::Rejected {
                status: 422,
                message: "Passwords must be 8 characters or more.".to_string(),
            });
        }
        Ok(())
    }

    fn check_username(directory: &Directory, username: &str, owner: Option<&str>) -> Result<(), IdentityError> {
        let taken = directory.accounts.values().any(|stored| {
            stored.account.username.as_deref() == Some(username)
                && Some(stored.account.id.as_str()) != owner
        });
        if taken {
            return Err(IdentityError::Rejected {
                status: 422,
                message: "That username is taken. Please try another.".to_string(),
            });
        }
        Ok(())
    }

    /// Makes every subsequent call fail with a 503 until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Removes an account behind the application's back.
    pub fn forget(&self, id: &str) -> bool {
        self.lock().accounts.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().accounts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn password_matches(&self, id: &str, password: &str) -> bool {
        self.lock()
            .accounts
            .get(id)
            .is_some_and(|stored| stored.password == password)
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(&self, new: &NewAccount) -> Result<Account, IdentityError> {
        let mut directory = self.lock();
        Self::available(&directory)?;
        Self::check_password(&new.password)?;
        Self::check_username(&directory, &new.username, None)?;

        directory.next_id += 1;
        let id = format!("user_{:06}", directory.next_id);
        let account = Account {
            id: id.clone(),
            username: Some(new.username.clone()),
            first_name: Some(new.first_name.clone()),
            last_name: Some(new.last_name.clone()),
            role: Some(new.role),
        };
        directory.accounts.insert(
            id,
            StoredAccount {
                account: account.clone(),
                password: new.password.clone(),
            },
        );
        debug!(id = %account.id, "In-memory identity account created");
        Ok(account)
    }

    async fn update_account(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Account, IdentityError> {
        let mut directory = self.lock();
        Self::available(&directory)?;
        if !directory.accounts.contains_key(id) {
            return Err(IdentityError::NotFound);
        }
        if let Some(password) = &changes.password {
            Self::check_password(password)?;
        }
        Self::check_username(&directory, &changes.username, Some(id))?;

        let stored = directory
            .accounts
            .get_mut(id)
            .ok_or(IdentityError::NotFound)?;
        stored.account.username = Some(changes.username.clone());
        stored.account.first_name = Some(changes.first_name.clone());
        stored.account.last_name = Some(changes.last_name.clone());
        if let Some(password) = &changes.password {
            stored.password = password.clone();
        }
        Ok(stored.account.clone())
    }

    async fn delete_account(&self, id: &str) -> Result<(), IdentityError> {
        let mut directory = self.lock();
        Self::available(&directory)?;
        directory
            .accounts
            .remove(id)
            .map(|_| ())
            .ok_or(IdentityError::NotFound)
    }

    async fn get_account(&self, id: &str) -> Result<Account, IdentityError> {
        let directory = self.lock();
        Self::available(&directory)?;
        directory
            .accounts
            .get(id)
            .map(|stored| stored.account.clone())
            .ok_or(IdentityError::NotFound)
    }
}
