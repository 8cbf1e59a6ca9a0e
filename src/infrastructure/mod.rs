//! Infrastructure layer modules
//!
//! This module contains shared infrastructure components:
//! - `config`: Application configuration and settings
//! - `error`: Unified error types
//! - `postgres`: PostgreSQL data source (pooled or direct)

pub mod config;
pub mod error;
pub mod postgres;
