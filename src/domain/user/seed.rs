//! Sample data inserted at startup.

use crate::error::Result;

use super::model::NewUser;
use super::repository::UserRepository;

/// Name/email pairs of the users created on every startup with seeding enabled.
pub const SAMPLE_USERS: [(&str, &str); 3] = [
    ("田中太郎", "tanaka@example.com"),
    ("佐藤花子", "sato@example.com"),
    ("鈴木一郎", "suzuki@example.com"),
];

/// Insert the sample users and return the resulting number of users.
pub async fn seed_sample_users(repository: &UserRepository) -> Result<i64> {
    for (name, email) in SAMPLE_USERS {
        repository.save(&NewUser::new(name, email)).await?;
    }

    let total = repository.count().await?;
    tracing::info!(
        seeded = SAMPLE_USERS.len(),
        total_users = total,
        "Database initialization complete"
    );
    Ok(total)
}
