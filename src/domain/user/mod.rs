//! User entity and its persistence.

mod model;
mod repository;
mod seed;

pub use model::{NewUser, User};
pub use repository::UserRepository;
pub use seed::{seed_sample_users, SAMPLE_USERS};
