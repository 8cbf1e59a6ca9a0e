use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::server::AppState;

use super::database::{database_info, execute_query, list_tables, pool_info, test_connection};
use super::health::health;
use super::users::{create_user, delete_user, list_users};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health))
        .nest(
            "/api/database",
            Router::new()
                // Introspection
                .route("/info", get(database_info))
                .route("/pool", get(pool_info))
                .route("/test", get(test_connection))
                .route("/tables", get(list_tables))
                // Raw SQL
                .route("/query", post(execute_query))
                // Users
                .route("/users", get(list_users).post(create_user))
                .route("/users/{id}", delete(delete_user)),
        )
}
