//! API layer - HTTP endpoint handlers organized by domain.

mod database;
mod health;
mod routes;
mod users;

// Re-export all handlers for use in server/app.rs
pub use database::{
    database_info, execute_query, list_tables, pool_info, test_connection,
    ConnectionTestResponse, QueryErrorResponse, QueryRequest, CONNECTION_FAILED_MESSAGE,
    CONNECTION_OK_MESSAGE,
};
pub use health::{health, DatabaseHealthResponse, HealthResponse};
pub use routes::api_routes;
pub use users::{create_user, delete_user, list_users, MessageResponse, USER_DELETED_MESSAGE};
