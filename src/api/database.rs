//! Database introspection and raw query endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::database::{DatabaseInfo, PoolInfo, QueryError, RowMap};
use crate::server::AppState;

pub const CONNECTION_OK_MESSAGE: &str = "Connection successful";
pub const CONNECTION_FAILED_MESSAGE: &str = "Connection failed";

#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub connected: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub sql: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QueryErrorResponse {
    pub error: String,
}

impl From<QueryError> for (StatusCode, Json<QueryErrorResponse>) {
    fn from(err: QueryError) -> Self {
        (
            StatusCode::BAD_REQUEST,
            Json(QueryErrorResponse {
                error: err.to_string(),
            }),
        )
    }
}

/// GET /api/database/info - Connection and driver metadata
#[tracing::instrument(name = "http.database_info", skip(state))]
pub async fn database_info(State(state): State<AppState>) -> Json<DatabaseInfo> {
    Json(state.database.database_info().await)
}

/// GET /api/database/pool - Connection pool snapshot
#[tracing::instrument(name = "http.pool_info", skip(state))]
pub async fn pool_info(State(state): State<AppState>) -> Json<PoolInfo> {
    Json(state.database.pool_info())
}

/// GET /api/database/test - Connectivity check
#[tracing::instrument(name = "http.test_connection", skip(state))]
pub async fn test_connection(State(state): State<AppState>) -> Json<ConnectionTestResponse> {
    let connected = state.database.test_connection().await;
    let message = if connected {
        CONNECTION_OK_MESSAGE
    } else {
        CONNECTION_FAILED_MESSAGE
    };

    Json(ConnectionTestResponse {
        connected,
        message: message.to_string(),
    })
}

/// GET /api/database/tables - Tables in the public schema
#[tracing::instrument(name = "http.list_tables", skip(state))]
pub async fn list_tables(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.database.table_names().await)
}

/// POST /api/database/query - Execute caller-supplied SQL verbatim
#[tracing::instrument(name = "http.execute_query", skip(state, request))]
pub async fn execute_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Vec<RowMap>>, (StatusCode, Json<QueryErrorResponse>)> {
    let Some(sql) = request.sql else {
        return Err(QueryError::Execution("no SQL statement supplied".to_string()).into());
    };

    match state.database.execute_query(&sql).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::info!(error = %e, "Ad-hoc query rejected");
            Err(e.into())
        }
    }
}
