//! Database introspection and raw query execution.
//!
//! Introspection never fails: connectivity problems are reported through
//! [`DatabaseInfo::Disconnected`], `false` or an empty listing. Only
//! [`DatabaseInfoService::execute_query`] hands an error back to the caller.

use std::sync::Arc;
use std::time::Duration;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use sqlx::Connection;
use thiserror::Error;

use crate::postgres::{ConnectionPoolSnapshot, DataSource};

use super::row::{row_to_json, RowMap};

pub const PRODUCT_NAME: &str = "PostgreSQL";
pub const DRIVER_NAME: &str = "SQLx PostgreSQL";
pub const DRIVER_VERSION: &str = "0.8";

const TABLES_QUERY: &str = "SELECT table_name::text FROM information_schema.tables \
                            WHERE table_schema = 'public'";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Query execution error: {0}")]
    Execution(String),
}

/// Connection and driver metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseMetadata {
    pub database_product_name: String,
    pub database_product_version: String,
    pub driver_name: String,
    pub driver_version: String,
    pub url: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseInfo {
    Connected(DatabaseMetadata),
    Disconnected { error: String },
}

/// Serialized as one flat object carrying a `connected` flag.
impl Serialize for DatabaseInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Connected<'a> {
            connected: bool,
            #[serde(flatten)]
            metadata: &'a DatabaseMetadata,
        }

        match self {
            DatabaseInfo::Connected(metadata) => Connected {
                connected: true,
                metadata,
            }
            .serialize(serializer),
            DatabaseInfo::Disconnected { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("connected", &false)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PoolInfo {
    Pooled(ConnectionPoolSnapshot),
    /// The data source does not pool connections; serializes as `{}`.
    Unpooled,
}

impl Serialize for PoolInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PoolInfo::Pooled(snapshot) => snapshot.serialize(serializer),
            PoolInfo::Unpooled => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

pub struct DatabaseInfoService {
    data_source: Arc<DataSource>,
    validation_timeout: Duration,
}

impl DatabaseInfoService {
    pub fn new(data_source: Arc<DataSource>, validation_timeout: Duration) -> Self {
        Self {
            data_source,
            validation_timeout,
        }
    }

    pub async fn database_info(&self) -> DatabaseInfo {
        match self.read_metadata().await {
            Ok(metadata) => DatabaseInfo::Connected(metadata),
            Err(error) => {
                tracing::warn!(error = %error, "Failed to read database metadata");
                DatabaseInfo::Disconnected { error }
            }
        }
    }

    async fn read_metadata(&self) -> Result<DatabaseMetadata, String> {
        let mut conn = self
            .data_source
            .acquire()
            .await
            .map_err(|e| e.to_string())?;

        let result: Result<(String, String), sqlx::Error> = sqlx::query_as(
            "SELECT current_setting('server_version'), current_user::text",
        )
        .fetch_one(&mut *conn)
        .await;
        conn.release().await;

        let (version, user_name) = result.map_err(|e| e.to_string())?;

        Ok(DatabaseMetadata {
            database_product_name: PRODUCT_NAME.to_string(),
            database_product_version: version,
            driver_name: DRIVER_NAME.to_string(),
            driver_version: DRIVER_VERSION.to_string(),
            url: self.data_source.database_url_masked(),
            user_name,
        })
    }

    pub fn pool_info(&self) -> PoolInfo {
        match self.data_source.snapshot() {
            Some(snapshot) => PoolInfo::Pooled(snapshot),
            None => PoolInfo::Unpooled,
        }
    }

    /// True when a connection can be obtained and answers a ping within the
    /// validation timeout.
    pub async fn test_connection(&self) -> bool {
        let check = async {
            let mut conn = self.data_source.acquire().await?;
            let ping = conn.ping().await;
            conn.release().await;
            ping.map_err(crate::postgres::DataSourceError::from)
        };

        match tokio::time::timeout(self.validation_timeout, check).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Connection test failed");
                false
            }
            Err(_) => {
                tracing::debug!(timeout = ?self.validation_timeout, "Connection test timed out");
                false
            }
        }
    }

    /// Names of the tables and views in the `public` schema, in catalog order.
    /// Empty when the catalog cannot be read.
    pub async fn table_names(&self) -> Vec<String> {
        let mut conn = match self.data_source.acquire().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list tables");
                return Vec::new();
            }
        };

        let result = sqlx::query_scalar::<_, String>(TABLES_QUERY)
            .fetch_all(&mut *conn)
            .await;
        conn.release().await;

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to list tables");
            Vec::new()
        })
    }

    /// Run caller-supplied SQL exactly as given. When the text holds several
    /// statements, the rows of all of them are returned in order.
    ///
    /// The statement is not validated or parameterized in any way. Whatever the
    /// connected role may do, the caller may do.
    #[tracing::instrument(name = "db.execute_query", skip(self, sql))]
    pub async fn execute_query(&self, sql: &str) -> Result<Vec<RowMap>, QueryError> {
        let mut conn = self
            .data_source
            .acquire()
            .await
            .map_err(|e| QueryError::Execution(e.to_string()))?;

        // simple query protocol: text results, several statements allowed
        let executor: &mut sqlx::PgConnection = &mut conn;
        let result = sqlx::Executor::fetch_all(executor, sqlx::raw_sql(sql)).await;
        conn.release().await;

        let rows = result.map_err(|e| QueryError::Execution(e.to_string()))?;
        let rows = rows
            .iter()
            .map(row_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| QueryError::Execution(e.to_string()))?;

        tracing::debug!(rows = rows.len(), "Query executed");
        Ok(rows)
    }
}
