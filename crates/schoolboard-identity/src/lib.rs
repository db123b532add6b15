//! Identity provider access for Schoolboard.
//!
//! Teachers, students, parents and admins sign in through a hosted identity
//! provider; their database rows use the provider-issued account id as the
//! primary key. This crate holds the provider abstraction, an HTTP client
//! and an in-memory directory, and the mirror operations the action layer
//! uses to keep rows and accounts consistent.

pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod mirror;
pub mod provider;

pub use client::IdentityClient;
pub use error::{IdentityError, ProviderFailure, tolerate_absent};
pub use http::HttpIdentityProvider;
pub use memory::InMemoryIdentityProvider;
pub use mirror::{provision_account, retire_account, sync_account};
pub use provider::{Account, AccountChanges, IdentityProvider, NewAccount};
