//! # Schoolboard Auth
//!
//! Session handling for the Schoolboard API:
//!
//! - [`claims`]: Session claim structures and role resolution
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use schoolboard_auth::{verify_session_token, SessionClaims};
//! use schoolboard_config::JwtConfig;
//!
//! let claims = verify_session_token(&token, &JwtConfig::from_env())?;
//! let role = claims.role_or(Role::Admin);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{SessionClaims, SessionMetadata};
pub use jwt::{create_session_token, verify_session_token};
