use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::database::DatabaseInfoService;
use crate::postgres::DataSource;
use crate::user::UserRepository;

/// Everything a request handler may touch. Built once in `main` from the
/// settings and cloned into each request by axum.
#[derive(Clone)]
pub struct AppState {
    pub data_source: Arc<DataSource>,
    pub database: Arc<DatabaseInfoService>,
    pub users: Arc<UserRepository>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: &Settings, data_source: DataSource) -> Self {
        let data_source = Arc::new(data_source);
        let database = Arc::new(DatabaseInfoService::new(
            data_source.clone(),
            Duration::from_secs(settings.database.validation_timeout_seconds),
        ));
        let users = Arc::new(UserRepository::new(data_source.clone()));

        Self {
            data_source,
            database,
            users,
            start_time: Instant::now(),
        }
    }
}
