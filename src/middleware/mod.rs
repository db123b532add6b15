//! Request middleware and extractors.
//!
//! - [`session`]: Session token lookup (bearer header or `__session` cookie)
//!   and the [`session::Session`] extractor
//! - [`access`]: The role-based route map and the redirecting access middleware
//!
//! # Access Flow
//!
//! 1. `route_access` resolves the caller's session, if any
//! 2. The path is matched against `ROUTE_ACCESS_MAP`
//! 3. The request is redirected (sign-in or role home), refused (403 on
//!    writes) or passed on with the `Session` in its extensions
//! 4. Handlers take `Session` as an extractor when they need the caller

pub mod access;
pub mod session;
