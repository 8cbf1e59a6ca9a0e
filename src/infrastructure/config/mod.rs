mod settings;

pub use settings::{DatabaseConfig, OtelConfig, SeedConfig, ServerConfig, Settings};
