//! User CRUD endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::Result;
use crate::server::AppState;
use crate::user::{NewUser, User};

pub const USER_DELETED_MESSAGE: &str = "User deleted";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/database/users - List all users
#[tracing::instrument(name = "http.list_users", skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.find_all().await?))
}

/// POST /api/database/users - Create a user
#[tracing::instrument(name = "http.create_user", skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<Json<User>> {
    Ok(Json(state.users.save(&request).await?))
}

/// DELETE /api/database/users/{id} - Delete a user
#[tracing::instrument(name = "http.delete_user", skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.users.delete_by_id(id).await?;

    Ok(Json(MessageResponse {
        message: USER_DELETED_MESSAGE.to_string(),
    }))
}
