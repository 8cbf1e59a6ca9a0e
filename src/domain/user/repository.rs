//! PostgreSQL-backed user repository.
//!
//! Table structure:
//! - `users` - `id BIGSERIAL PRIMARY KEY`, `name`, `email`

use std::sync::Arc;

use crate::error::Result;
use crate::postgres::DataSource;

use super::model::{NewUser, User};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255),
        email VARCHAR(255)
    )
"#;

pub struct UserRepository {
    data_source: Arc<DataSource>,
}

impl UserRepository {
    pub fn new(data_source: Arc<DataSource>) -> Self {
        Self { data_source }
    }

    /// Create the `users` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.data_source.acquire().await?;
        let result = sqlx::query(CREATE_TABLE).execute(&mut *conn).await;
        conn.release().await;

        result?;
        tracing::debug!("Users table ready");
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        let mut conn = self.data_source.acquire().await?;
        let result = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&mut *conn)
            .await;
        conn.release().await;

        Ok(result?)
    }

    /// Insert a user and return it with its assigned id.
    pub async fn save(&self, user: &NewUser) -> Result<User> {
        let mut conn = self.data_source.acquire().await?;
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&mut *conn)
        .await;
        conn.release().await;

        let saved = result?;
        tracing::debug!(user_id = saved.id, "User saved");
        Ok(saved)
    }

    /// Delete a user by id. Deleting an id that does not exist is not an
    /// error; the number of removed rows is returned.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let mut conn = self.data_source.acquire().await?;
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await;
        conn.release().await;

        let deleted = result?.rows_affected();
        tracing::debug!(user_id = id, deleted, "User delete executed");
        Ok(deleted)
    }

    pub async fn count(&self) -> Result<i64> {
        let mut conn = self.data_source.acquire().await?;
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *conn)
            .await;
        conn.release().await;

        Ok(result?)
    }
}
