//! # Schoolboard Config
//!
//! Configuration types for the Schoolboard API, loaded from environment variables:
//!
//! - [`access`]: Role fallback and sign-in path for the access middleware
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`identity`]: Identity provider endpoint, credentials and backend choice
//! - [`jwt`]: Session token verification
//! - [`server`]: Listening ports
//!
//! # Example
//!
//! ```ignore
//! use schoolboard_config::{AccessConfig, CorsConfig, IdentityConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let identity_config = IdentityConfig::from_env();
//! ```

pub mod access;
pub mod cors;
pub mod identity;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use access::AccessConfig;
pub use cors::CorsConfig;
pub use identity::{IdentityBackend, IdentityConfig};
pub use jwt::JwtConfig;
pub use server::ServerConfig;
