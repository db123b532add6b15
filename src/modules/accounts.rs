//! Identity account payloads for the user-bearing entities.

use schoolboard_core::{ActionError, Role};
use schoolboard_identity::{AccountChanges, NewAccount};

/// Account for a new teacher, student or parent. A password is mandatory
/// when the account is first created.
pub fn new_account(
    role: Role,
    username: &str,
    password: Option<&str>,
    name: &str,
    surname: &str,
) -> Result<NewAccount, ActionError> {
    let password = password.ok_or_else(|| ActionError::invalid("password", "Password is required"))?;

    Ok(NewAccount {
        username: username.to_string(),
        password: password.to_string(),
        first_name: name.to_string(),
        last_name: surname.to_string(),
        role,
    })
}

/// Profile changes for an update; no password keeps the current one.
pub fn account_changes(username: &str, password: Option<&str>, name: &str, surname: &str) -> AccountChanges {
    AccountChanges {
        username: username.to_string(),
        password: password.map(str::to_string),
        first_name: name.to_string(),
        last_name: surname.to_string(),
    }
}
