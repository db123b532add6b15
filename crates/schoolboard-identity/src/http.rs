//! Identity provider reached over its backend HTTP API.
//!
//! Speaks the Clerk-style user API: `POST /users`, `PATCH /users/{id}`,
//! `DELETE /users/{id}` and `GET /users/{id}`, authenticated with a bearer
//! secret key. The role is kept in the account's public metadata.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use schoolboard_config::IdentityConfig;
use schoolboard_core::Role;

use crate::error::IdentityError;
use crate::provider::{Account, AccountChanges, IdentityProvider, NewAccount};

#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIdentityProvider")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetadata {
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    public_metadata: PublicMetadata,
}

impl From<UserPayload> for Account {
    fn from(user: UserPayload) -> Self {
        Account {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user
                .public_metadata
                .role
                .as_deref()
                .and_then(|r| r.parse::<Role>().ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    long_message: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdatePayload<'a> {
    username: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

impl HttpIdentityProvider {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Configuration`] when no secret key is set or
    /// the key is not a valid header value.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let secret = config
            .secret_key
            .as_deref()
            .ok_or_else(|| IdentityError::Configuration("IDENTITY_SECRET_KEY is not set".into()))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {secret}"))
            .map_err(|e| IdentityError::Configuration(format!("invalid secret key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let base_url = Url::parse(&config.api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| IdentityError::Configuration(format!("invalid API URL: {}", config.api_url)))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
        })
    }

    fn users_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users");
        }
        url
    }

    /// The id is pushed as one escaped path segment; ids that cannot name a
    /// single segment are reported as absent without a request.
    fn user_url(&self, id: &str) -> Result<Url, IdentityError> {
        if matches!(id, "" | "." | "..") {
            return Err(IdentityError::NotFound);
        }
        let mut url = self.users_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        Ok(url)
    }

    async fn into_account(response: Response) -> Result<Account, IdentityError> {
        let response = Self::check(response).await?;
        let user: UserPayload = response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))?;
        Ok(user.into())
    }

    /// Maps a non-2xx response to an error; 404 becomes `NotFound`.
    async fn check(response: Response) -> Result<Response, IdentityError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(IdentityError::NotFound);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorPayload>(&body)
            .ok()
            .map(|payload| {
                payload
                    .errors
                    .into_iter()
                    .filter_map(|e| e.long_message.or(e.message))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|m| !m.is_empty())
            .unwrap_or(body);

        Err(IdentityError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

impl IdentityProvider for HttpIdentityProvider {
    #[instrument(skip(self, account), fields(username = %account.username, role = %account.role))]
    async fn create_account(&self, account: &NewAccount) -> Result<Account, IdentityError> {
        let body = json!({
            "username": account.username,
            "password": account.password,
            "first_name": account.first_name,
            "last_name": account.last_name,
            "public_metadata": { "role": account.role.as_str() },
        });

        let response = self
            .client
            .post(self.users_url())
            .json(&body)
            .send()
            .await?;
        let created = Self::into_account(response).await?;
        debug!(id = %created.id, "Identity account created");
        Ok(created)
    }

    #[instrument(skip(self, changes))]
    async fn update_account(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Account, IdentityError> {
        let body = UpdatePayload {
            username: &changes.username,
            first_name: &changes.first_name,
            last_name: &changes.last_name,
            password: changes.password.as_deref(),
        };

        let response = self.client.patch(self.user_url(id)?).json(&body).send().await?;
        Self::into_account(response).await
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, id: &str) -> Result<(), IdentityError> {
        let response = self.client.delete(self.user_url(id)?).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_account(&self, id: &str) -> Result<Account, IdentityError> {
        let response = self.client.get(self.user_url(id)?).send().await?;
        Self::into_account(response).await
    }
}
