//! # Schoolboard CLI
//!
//! Database seeding and administrator provisioning for development and
//! first-run setup.
//!
//! ## Usage
//!
//! ```ignore
//! use schoolboard_cli::seeder::{seed_all, SeedConfig};
//!
//! let report = seed_all(&pool, &SeedConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;
