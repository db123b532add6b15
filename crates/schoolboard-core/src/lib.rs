//! # Schoolboard Core
//!
//! Core types, errors, and utilities for the Schoolboard API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`action`]: Tagged outcome of create/update/delete actions
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-based pagination, search and sort parameters
//! - [`roles`]: The four user roles and their home paths
//! - [`serde`]: Form-field coercion helpers (empty strings, numbers, dates, flags)
//!
//! # Example
//!
//! ```ignore
//! use schoolboard_core::action::{ActionError, ActionResponse};
//! use schoolboard_core::roles::Role;
//!
//! let role: Role = "teacher".parse()?;
//! assert_eq!(role.home_path(), "/teacher");
//!
//! let err = ActionError::not_found("class", 7);
//! assert_eq!(err.kind(), FailureKind::NotFound);
//! ```

pub mod action;
pub mod errors;
pub mod pagination;
pub mod roles;
pub mod serde;

// Re-export commonly used types at crate root
pub use action::{ActionError, ActionResponse, FailureKind, FieldError};
pub use errors::AppError;
pub use pagination::{ListParams, Paginated, PaginationMeta, PaginationParams, SortOrder};
pub use roles::Role;
