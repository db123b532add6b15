use std::env;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityBackend {
    /// Hosted identity provider reached over HTTP.
    Http,
    /// Process-local accounts, for development and tests.
    Memory,
}

#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub backend: IdentityBackend,
    pub api_url: String,
    pub secret_key: Option<String>,
    pub timeout: Duration,
    pub sign_in_url: String,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret_key = lookup("IDENTITY_SECRET_KEY")
            .filter(|s| !s.trim().is_empty());

        let backend = match lookup("IDENTITY_PROVIDER").as_deref() {
            Some("http") => IdentityBackend::Http,
            Some("memory") => IdentityBackend::Memory,
            Some(other) => {
                tracing::warn!(value = other, "Unknown IDENTITY_PROVIDER, falling back to memory");
                IdentityBackend::Memory
            }
            None if secret_key.is_some() => IdentityBackend::Http,
            None => IdentityBackend::Memory,
        };

        Self {
            backend,
            api_url: lookup("IDENTITY_API_URL")
                .unwrap_or_else(|| "https://api.clerk.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            secret_key,
            timeout: Duration::from_secs(
                lookup("IDENTITY_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            sign_in_url: lookup("IDENTITY_SIGN_IN_URL")
                .unwrap_or_else(|| "https://accounts.example.com/sign-in".to_string()),
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: IdentityBackend::Memory,
            api_url: String::new(),
            secret_key: None,
            timeout: Duration::from_secs(10),
            sign_in_url: "/sign-in".to_string(),
        }
    }
}
