//! PostgreSQL connectivity.
//!
//! Provides the pooled or direct data source every database operation goes through.

pub mod data_source;

pub use data_source::{mask_url, Checkout, ConnectionPoolSnapshot, DataSource, DataSourceError};
