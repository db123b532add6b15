use schoolboard_config::{IdentityBackend, IdentityConfig};
use tracing::info;

use crate::error::IdentityError;
use crate::http::HttpIdentityProvider;
use crate::memory::InMemoryIdentityProvider;
use crate::provider::{Account, AccountChanges, IdentityProvider, NewAccount};

/// The process-wide identity client held in application state.
#[derive(Debug, Clone)]
pub enum IdentityClient {
    Http(HttpIdentityProvider),
    Memory(InMemoryIdentityProvider),
}

impl IdentityClient {
    pub fn from_config(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let client = match config.backend {
            IdentityBackend::Http => Self::Http(HttpIdentityProvider::new(config)?),
            IdentityBackend::Memory => Self::Memory(InMemoryIdentityProvider::new()),
        };
        info!(backend = client.backend_name(), "Identity client initialized");
        Ok(client)
    }

    pub fn memory() -> Self {
        Self::Memory(InMemoryIdentityProvider::new())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Memory(_) => "memory",
        }
    }

    /// The in-memory directory, when that backend is active.
    pub fn as_memory(&self) -> Option<&InMemoryIdentityProvider> {
        match self {
            Self::Memory(provider) => Some(provider),
            Self::Http(_) => None,
        }
    }
}

impl From<InMemoryIdentityProvider> for IdentityClient {
    fn from(provider: InMemoryIdentityProvider) -> Self {
        Self::Memory(provider)
    }
}

impl IdentityProvider for IdentityClient {
    async fn create_account(&self, account: &NewAccount) -> Result<Account, IdentityError> {
        match self {
            Self::Http(p) => p.create_account(account).await,
            Self::Memory(p) => p.create_account(account).await,
        }
    }

    async fn update_account(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Account, IdentityError> {
        match self {
            Self::Http(p) => p.update_account(id, changes).await,
            Self::Memory(p) => p.update_account(id, changes).await,
        }
    }

    async fn delete_account(&self, id: &str) -> Result<(), IdentityError> {
        match self {
            Self::Http(p) => p.delete_account(id).await,
            Self::Memory(p) => p.delete_account(id).await,
        }
    }

    async fn get_account(&self, id: &str) -> Result<Account, IdentityError> {
        match self {
            Self::Http(p) => p.get_account(id).await,
            Self::Memory(p) => p.get_account(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_config_builds_memory_client() {
        let client = IdentityClient::from_config(&IdentityConfig::memory()).unwrap();
        assert_eq!(client.backend_name(), "memory");
        assert!(client.as_memory().is_some());
    }

    #[test]
    fn http_backend_without_secret_fails() {
        let mut config = IdentityConfig::memory();
        config.backend = IdentityBackend::Http;
        assert!(IdentityClient::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn clones_share_the_directory() {
        let provider = InMemoryIdentityProvider::new();
        let client = IdentityClient::from(provider.clone());
        let account = client
            .create_account(&NewAccount {
                username: "ada".into(),
                password: "password123".into(),
                first_name: "Ada".into(),
                last_name: "Obi".into(),
                role: schoolboard_core::Role::Parent,
            })
            .await
            .unwrap();

        assert!(provider.contains(&account.id));
    }
}
