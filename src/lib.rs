// Infrastructure layer (shared components)
pub mod infrastructure;

pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::postgres;

// Domain layer (business logic)
pub mod domain;

pub use domain::database;
pub use domain::user;

// Application layer
pub mod api;
pub mod server;

// Supporting modules
pub mod telemetry;
