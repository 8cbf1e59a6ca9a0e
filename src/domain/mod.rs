//! Domain layer modules
//!
//! This module contains business domain logic:
//! - `database`: Connection metadata, pool statistics, catalog listing, raw queries
//! - `user`: User entity, repository and startup seeding

pub mod database;
pub mod user;
